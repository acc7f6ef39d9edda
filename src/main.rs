fn main() {
    storefront_touch::run();
}
