use ibmcloud_cli::display::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = ibmcloud_cli::run().await {
        print_error(&format!("Error: {}", e));
        std::process::exit(1);
    }
}
