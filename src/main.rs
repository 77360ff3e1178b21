use env_logger::Env;
use focustree::TreeExporter;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    TreeExporter::default().run()?;

    println!("Decision Tree model trained and saved successfully!");
    Ok(())
}
