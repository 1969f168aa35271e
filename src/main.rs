fn main() {
    scaffold::cli::run();
}
