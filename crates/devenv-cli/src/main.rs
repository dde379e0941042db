fn main() {
    if let Err(error) = devenv_cli::run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
