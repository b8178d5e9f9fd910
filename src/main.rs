use activity_client::api::activities::HttpActivityApi;
use activity_client::command::{Command, Input, HELP};
use activity_client::config::AppConfig;
use activity_client::models::clock::SystemClock;
use activity_client::utils::display::DisplayFormatter;
use activity_client::ActivityClient;
use std::error::Error;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

type Client = ActivityClient<HttpActivityApi, SystemClock>;

fn paint(client: &Client, display: &DisplayFormatter) -> io::Result<()> {
    println!(
        "{}",
        display.format_screen(client.screen(), client.form(), client.visible_message())
    );
    prompt()
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    info!("Starting activity client against {}", config.base_url);

    let mut client = ActivityClient::new(
        HttpActivityApi::new(config.base_url.clone()),
        SystemClock,
        config.cache_duration,
    );
    let display = DisplayFormatter::new();

    println!("=== Activity Sign-Up ===");
    println!("{}", HELP);

    // The first tick fires immediately and serves as the initial load.
    let mut refresh = interval(config.cache_duration);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                debug!("Periodic refresh");
                client.render().await;
                paint(&client, &display)?;
            }
            line = lines.next_line() => {
                let command = match Input::from_read(line) {
                    Input::Command(command) => command,
                    Input::Blank => {
                        prompt()?;
                        continue;
                    }
                    Input::Invalid(e) => {
                        println!("{}", e);
                        prompt()?;
                        continue;
                    }
                    Input::Unreadable(e) => {
                        warn!("Could not read input line: {}", e);
                        prompt()?;
                        continue;
                    }
                    Input::Closed => {
                        debug!("Input closed");
                        break;
                    }
                };

                match command {
                    Command::Exit => {
                        debug!("Received exit command");
                        break;
                    }
                    Command::Help => {
                        println!("{}", HELP);
                        prompt()?;
                    }
                    Command::Refresh => {
                        client.render().await;
                        paint(&client, &display)?;
                    }
                    Command::Select(activity) => {
                        if !client.select_activity(&activity) {
                            println!("No such activity: {}", activity);
                        }
                        println!("{}", display.format_form(client.form()));
                        prompt()?;
                    }
                    Command::Email(email) => {
                        client.set_email(&email);
                        println!("{}", display.format_form(client.form()));
                        prompt()?;
                    }
                    Command::Submit => {
                        if client.submit_signup().await.is_none() {
                            println!("Please select an activity and enter an email first.");
                        }
                        paint(&client, &display)?;
                    }
                    Command::Signup { email, activity } => {
                        if client.select_activity(&activity) {
                            client.set_email(&email);
                            client.submit_signup().await;
                        } else {
                            println!("No such activity: {}", activity);
                        }
                        paint(&client, &display)?;
                    }
                    Command::Remove(index) => {
                        if client.remove(index).await.is_none() {
                            println!("No participant numbered {}", index);
                        }
                        paint(&client, &display)?;
                    }
                    Command::Unregister { email, activity } => {
                        client.unregister(&activity, &email).await;
                        paint(&client, &display)?;
                    }
                }
            }
        }
    }

    info!("Shutting down");
    Ok(())
}
