// WASM entrypoint for Trunk.
//
// Native builds of this crate are no-ops; the real host is behind
// `--features web` and `wasm32`. `start` is idempotent, so it is safe that
// the library's own `wasm_bindgen(start)` hook also runs.

fn main() {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    serenity_web::start();
}
