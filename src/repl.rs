//! Interactive stdin/stdout loop — onboarding form and dashboard commands.

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::app::AppController;
use crate::app::controller::{LOADING_ADAPTIVE, LOADING_INITIAL};
use crate::error::Result;
use crate::gateway::DEFAULT_SCENARIO;
use crate::profile::{FarmerProfile, PLACEHOLDER_GOALS, PLACEHOLDER_LOCATION};
use crate::render;

const DASHBOARD_HELP: &str = "\
Commands:
  /simulate            simulate \"Unseasonal heavy monsoon surge\"
  /simulate <text>     simulate a custom climate scenario
  /image               show the layout visualization status
  /reset               discard everything and start over
  /quit                exit";

/// Interpretation of one line typed at an onboarding prompt.
///
/// Commands are recognized before the line can become a field value, so
/// typing `/reset` at the Location prompt never turns into a location.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldInput {
    /// A field value; blank input accepts the shown placeholder.
    Value(String),
    Reset,
    Quit,
}

fn parse_field_input(line: &str, placeholder: &str) -> FieldInput {
    match line.trim() {
        "/quit" => FieldInput::Quit,
        "/reset" => FieldInput::Reset,
        "" => FieldInput::Value(placeholder.to_string()),
        value => FieldInput::Value(value.to_string()),
    }
}

/// Run the interactive loop until EOF or `/quit`.
pub async fn run(controller: &AppController) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        let state = controller.snapshot().await;

        if state.view.is_dashboard() {
            eprint!("agri> ");
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            match line {
                "" => continue,
                "/quit" => break,
                "/reset" => {
                    controller.reset().await;
                    println!("\nStarting over.\n");
                }
                "/image" => {
                    let state = controller.snapshot().await;
                    println!("{}", render::image_status(&state.image));
                }
                _ if line.starts_with("/simulate") => {
                    let scenario = line
                        .strip_prefix("/simulate")
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .unwrap_or(DEFAULT_SCENARIO);
                    eprintln!("{}", render::loading_line(LOADING_ADAPTIVE));
                    controller.simulate_scenario(scenario).await;
                    println!("\n{}", render::render(&controller.snapshot().await));
                }
                _ => println!("{DASHBOARD_HELP}"),
            }
        } else {
            // Onboarding: prompt for the two profile fields.
            if let Some(ref error) = state.error {
                println!("\n{}\n", render::error_banner(error));
            }
            println!("{}", render::onboarding_banner());

            let location = match prompt_field(&mut lines, "Location", PLACEHOLDER_LOCATION).await? {
                FieldInput::Value(value) => value,
                FieldInput::Reset => {
                    controller.reset().await;
                    println!("\nStarting over.\n");
                    continue;
                }
                FieldInput::Quit => break,
            };
            let goals = match prompt_field(&mut lines, "Goals", PLACEHOLDER_GOALS).await? {
                FieldInput::Value(value) => value,
                FieldInput::Reset => {
                    controller.reset().await;
                    println!("\nStarting over.\n");
                    continue;
                }
                FieldInput::Quit => break,
            };

            let profile = match FarmerProfile::new(location, goals) {
                Ok(profile) => profile,
                Err(e) => {
                    println!("\n{}\n", render::error_banner(&e.to_string()));
                    continue;
                }
            };

            eprintln!("{}", render::loading_line(LOADING_INITIAL));
            if controller.submit_profile(profile).await {
                println!("\n{}", render::render(&controller.snapshot().await));
                println!("{DASHBOARD_HELP}");
            }
        }
    }

    Ok(())
}

/// Prompt for one field. EOF is treated as `/quit`.
async fn prompt_field(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
    placeholder: &str,
) -> Result<FieldInput> {
    eprint!("{label} [{placeholder}]: ");
    let Some(line) = lines.next_line().await? else {
        return Ok(FieldInput::Quit);
    };
    Ok(parse_field_input(&line, placeholder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_at_a_prompt_is_a_command_not_a_value() {
        assert_eq!(
            parse_field_input("/reset", PLACEHOLDER_LOCATION),
            FieldInput::Reset
        );
        assert_eq!(
            parse_field_input("  /reset  ", PLACEHOLDER_LOCATION),
            FieldInput::Reset
        );
    }

    #[test]
    fn quit_at_a_prompt_is_a_command_not_a_value() {
        assert_eq!(
            parse_field_input("/quit", PLACEHOLDER_GOALS),
            FieldInput::Quit
        );
    }

    #[test]
    fn blank_input_accepts_the_placeholder() {
        assert_eq!(
            parse_field_input("   ", PLACEHOLDER_LOCATION),
            FieldInput::Value(PLACEHOLDER_LOCATION.to_string())
        );
    }

    #[test]
    fn ordinary_text_is_a_trimmed_value() {
        assert_eq!(
            parse_field_input("  Kerala, India  ", PLACEHOLDER_LOCATION),
            FieldInput::Value("Kerala, India".to_string())
        );
    }
}
