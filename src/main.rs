fn main() {
    if let Err(err) = flickrbb::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
