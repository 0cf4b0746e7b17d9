use std::path::Path;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=tailwind.css");
    println!("cargo:rerun-if-changed=src/ui");

    // The checked-in stylesheet is used as-is when the tailwind CLI is unavailable
    if !Path::new("node_modules/.bin/tailwindcss").exists() {
        println!("cargo:warning=tailwindcss not installed, using committed assets/tailwind.css");
        return;
    }

    let output = Command::new("npx")
        .arg("tailwindcss")
        .args(["-i", "tailwind.css", "-o", "assets/tailwind.css"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output();

    match output {
        Ok(output) if !output.status.success() => {
            println!("cargo:warning=Failed to generate Tailwind CSS");
            println!(
                "cargo:warning=STDERR: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(_) => {}
        Err(e) => {
            println!("cargo:warning=Failed to run tailwindcss: {}", e);
        }
    }
}
