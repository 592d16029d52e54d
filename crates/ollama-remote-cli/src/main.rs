// ollama-remote CLI entry point

use ollama_remote_cli::{output, router::CommandRouter, VerbosityLevel};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match CommandRouter::route().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::print_error(&e.user_message());
            if VerbosityLevel::current() >= VerbosityLevel::Verbose {
                eprintln!("{}", e.technical_details());
            }
            std::process::exit(1);
        }
    }
}
