fn main() -> Result<(), Box<dyn std::error::Error>> {
    cutie::cli::main()
}
