use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub struct Loading {}

impl Loading {
    pub fn title(in_flight: usize) -> String {
        if in_flight == 1 {
            return "Waiting for 1 response...".to_string();
        }

        return format!("Waiting for {in_flight} responses...");
    }

    pub fn render<B: Backend>(frame: &mut Frame<B>, rect: Rect, in_flight: usize) {
        frame.render_widget(
            Paragraph::new(Loading::title(in_flight))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .alignment(Alignment::Center),
            rect,
        );
    }
}
