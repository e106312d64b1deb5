use harris_cli::{CornerPipeline, DetectorBuilder};
use harris_detect::{CrossTerm, DetectorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Harris Configuration Demo");
    println!("=========================\n");

    let input = std::env::args().nth(1).unwrap_or_else(|| "lenna.png".to_string());
    let img = CornerPipeline::load_image(&input)?;
    println!("Image dimensions: {}x{}", img.width(), img.height());

    let dense = DetectorConfig::dense_preset().with_metadata("Dense", "Tracking initialization");
    let sparse = DetectorConfig::sparse_preset();
    let custom = DetectorBuilder::new()
        .k(0.05)
        .filter_range(2)
        .cross_term(CrossTerm::Product)
        .percentage(0.02)
        .suppression_radius(5)
        .to_config()
        .with_metadata("Custom", "Product cross term, wide window");

    for config in [&dense, &sparse, &custom] {
        println!("  {}", config.summary());
    }

    dense.save_json("dense_config.json")?;
    custom.save_toml("custom_config.toml")?;
    println!("\nSaved dense_config.json and custom_config.toml");

    for path in ["dense_config.json", "custom_config.toml"] {
        let pipeline = CornerPipeline::from_config_file(path)?;
        let detection = pipeline.detect(&img)?;
        println!(
            "  {}: {} corners in {:.2?}",
            path,
            detection.candidates.len(),
            detection.elapsed
        );
    }

    println!("\nCustom config as TOML:\n{}", custom.to_toml()?);
    Ok(())
}
