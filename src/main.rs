fn main() {
    clusterforge::app::cli::run();
}
