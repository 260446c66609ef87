use vidiwise_core::{Msg, Screen};

pub const HELP: &str = "\
Commands:
  <url>          submit a video (landing screen)
  <question>     ask about the ready video (chat screen)
  /video <url>   submit another video
  /cancel        abandon the running submission
  /help          show this help
  /quit          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Msgs(Vec<Msg>),
    Help,
    Quit,
    Ignored,
}

/// Turns one line typed at the prompt into messages for the core. Plain text
/// is a video URL on the landing screen and a question on the chat screen.
pub fn parse_line(screen: Screen, line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Ignored;
    }

    if let Some(command) = line.strip_prefix('/') {
        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };
        return match name {
            "quit" | "exit" => Input::Quit,
            "cancel" => Input::Msgs(vec![Msg::CancelClicked]),
            "video" => submit_video(arg),
            _ => Input::Help,
        };
    }

    match screen {
        Screen::Landing => submit_video(line),
        Screen::Chat => Input::Msgs(vec![
            Msg::ChatInputChanged(line.to_string()),
            Msg::ChatSubmitted,
        ]),
    }
}

fn submit_video(url: &str) -> Input {
    Input::Msgs(vec![Msg::InputChanged(url.to_string()), Msg::VideoSubmitted])
}
