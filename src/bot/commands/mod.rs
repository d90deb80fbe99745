pub mod session_management;
pub mod stats;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Game poll bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Open a voting round (admin only)")]
    Start,
    #[command(description = "Close the voting round (admin only)")]
    Stop,
    #[command(description = "Show current votes and all-time attendance")]
    Stats,
    #[command(description = "Change the voting deadline (admin only, not available yet)")]
    SetEndTime,
}
