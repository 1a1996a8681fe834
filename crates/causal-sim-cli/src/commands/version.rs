//! Version command implementation.

/// Version information for the CLI.
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() {
    println!("causal-sim {VERSION}");
    println!();
    println!("Synthetic experiments for teaching causal inference.");
    println!();
    println!("Build info:");
    println!("  Target:       {}", std::env::consts::ARCH);
    println!("  OS:           {}", std::env::consts::OS);
    println!(
        "  LCG:          x' = (x * {} + {}) mod {}",
        causal_sim::LCG_MULTIPLIER,
        causal_sim::LCG_INCREMENT,
        causal_sim::LCG_MODULUS
    );
}
