//! `chisel list` - list the available transforms.

use console::style;
use miette::Result;

use chisel_transforms::registry;

pub fn list_execute() -> Result<()> {
    let transforms = registry();
    let width = transforms
        .iter()
        .map(|transform| transform.name().len())
        .max()
        .unwrap_or(0);

    println!("{}", style("available transforms:").bold());
    for transform in transforms {
        let padded = format!("{:width$}", transform.name());
        println!("  {}  {}", style(padded).cyan(), transform.description());
    }
    Ok(())
}
