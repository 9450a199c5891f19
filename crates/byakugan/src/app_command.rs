/// Commands typed by the user at the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Flip the recording control.
    Toggle,
    /// Print the current view again.
    Status,
    /// Point the client at another appliance and remount the session.
    SetServer {
        /// New `host:port` or URL.
        address: String,
    },
    /// Print the command list.
    Help,
    /// Request application shutdown.
    Shutdown,
}

impl AppCommand {
    /// Parse one input line. Returns `None` for blank or unknown input.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_ascii_lowercase();

        match verb.as_str() {
            "t" | "toggle" | "r" | "record" => Some(AppCommand::Toggle),
            "s" | "status" => Some(AppCommand::Status),
            "server" => words.next().map(|address| AppCommand::SetServer {
                address: address.to_string(),
            }),
            "h" | "help" | "?" => Some(AppCommand::Help),
            "q" | "quit" | "exit" => Some(AppCommand::Shutdown),
            _ => None,
        }
    }
}

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  t, toggle          start or stop recording
  s, status          show the live feed view
  server <address>   switch to another appliance (host:port or URL)
  h, help            show this list
  q, quit            exit";
