fn main() {
    if let Err(e) = casi_lib::run() {
        eprintln!("casi: {}", e);
        std::process::exit(e.exit_code());
    }
}
