use moonview::{Color, MoonCommand, MoonConfig, MoonWindow};
use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MoonConfig::builder()
        .title("Moon - random colors".to_string())
        .preferred_diameter_dp(160)
        .outline_width(3.0)
        .animation_duration(Duration::from_millis(2500))
        .build();

    let (sender, receiver) = mpsc::channel();

    // Recolor the moon a few times a second until the window closes
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let commands = [
                MoonCommand::SetFillColor(Color::from_argb(
                    0xff,
                    rng.random_range(0x80..=0xff),
                    rng.random_range(0x80..=0xff),
                    rng.random_range(0x00..=0x60),
                )),
                MoonCommand::SetOutlineColor(Color::from_argb(
                    0xff,
                    rng.random_range(0x00..=0x60),
                    rng.random_range(0x00..=0x60),
                    rng.random_range(0x00..=0x60),
                )),
            ];

            if commands.iter().any(|cmd| sender.send(cmd.clone()).is_err()) {
                break;
            }

            thread::sleep(Duration::from_millis(400));
        }
    });

    println!("Displaying a moon whose colors change every 400ms");
    println!("Press Ctrl+C or close the window to exit");

    MoonWindow::new(config).show_with_commands(receiver)?;
    Ok(())
}
