fn main() {
    touch_fps::app().run();
}
