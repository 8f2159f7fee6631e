//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum subset-sum circuits",
        style("QSS").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qss-ir           Circuit intermediate representation");
    println!("  qss-hal          Hardware abstraction layer");
    println!("  qss-adapter-sim  Statevector simulator backend");
    println!("  qss-core         Circuit construction and result decoding");
    println!("  qss-cli          Command-line interface");
    println!();
    println!("License: {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
