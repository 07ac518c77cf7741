//! Emitters command - list registered model emitters.

/// Run the emitters command
pub fn run() -> i32 {
    for emitter in protodto_typegen::emitters() {
        println!("{} (.{})", emitter.name(), emitter.extension());
    }
    0
}
