pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(&smartday_core::health())?);
    Ok(())
}
