use anyhow::Result;
use trusted_device::cli;

// Main function
fn main() -> Result<()> {
    // Parse arguments and install logging
    let action = cli::start()?;

    // Handle the action
    let output = action.execute()?;
    println!("{output}");

    Ok(())
}
