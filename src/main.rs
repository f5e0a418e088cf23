fn main() {
    if let Err(err) = connector_pairing::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
