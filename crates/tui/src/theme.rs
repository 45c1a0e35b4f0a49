use ratatui::style::Color;

pub struct Theme {
    pub input_border: Color,
    pub log_border: Color,
    pub chat_fg: Color,
    pub server_fg: Color,
    pub client_fg: Color,
    pub hint_fg: Color,
}

pub const THEME: Theme = Theme {
    input_border: Color::Cyan,
    log_border: Color::DarkGray,
    chat_fg: Color::Green,
    server_fg: Color::Magenta,
    client_fg: Color::DarkGray,
    hint_fg: Color::DarkGray,
};
