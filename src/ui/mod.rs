pub mod progress;

use crate::phy::scheme::SchemeRegistry;

pub fn print_banner() {
    println!("phylink-rs {}", env!("CARGO_PKG_VERSION"));
}

/// One line per registered name.
pub fn print_schemes(registry: &SchemeRegistry) {
    for name in registry.names() {
        if let Ok(scheme) = registry.resolve(name) {
            let kind = if scheme.is_baseband() { "line code" } else { "carrier" };
            println!("{name:<12} {kind:<10} -> {scheme}");
        }
    }
}
