use chatline_core::{ChatController, Reply};
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Input,
    Transcript,
}

pub struct App {
    pub should_quit: bool,
    pub focus: FocusPane,
    pub controller: ChatController,
    pub server_url: String,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Panel areas for mouse hit-testing (updated during render)
    pub transcript_area: Option<Rect>,
    pub input_area: Option<Rect>,
    pub send_area: Option<Rect>,
}

impl App {
    pub fn new(controller: ChatController, server_url: String) -> Self {
        Self {
            should_quit: false,
            focus: FocusPane::Input,
            controller,
            server_url,
            animation_frame: 0,
            transcript_area: None,
            input_area: None,
            send_area: None,
        }
    }

    /// The send control. Enter in the input field and a click on the Send
    /// button both land here.
    pub fn activate_send(&mut self) -> Option<u64> {
        self.controller.submit()
    }

    pub fn settle(&mut self, reply: Reply) {
        self.controller.settle(reply);
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.controller.is_awaiting() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        } else {
            self.animation_frame = 0;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Input => FocusPane::Transcript,
            FocusPane::Transcript => FocusPane::Input,
        };
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.controller.transcript_mut().scroll_up(rows);
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.controller.transcript_mut().scroll_down(rows);
    }

    pub fn page_up(&mut self) {
        let rows = self.controller.transcript().page_rows();
        self.scroll_up(rows);
    }

    pub fn page_down(&mut self) {
        let rows = self.controller.transcript().page_rows();
        self.scroll_down(rows);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.controller.transcript_mut().scroll_to_bottom();
    }
}
