/// Glyph repeated once per remaining life
pub const HEART: char = '♥';

pub fn hearts(lives: u32) -> String {
    std::iter::repeat_n(HEART, lives as usize).collect()
}

pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

pub fn lives_label(lives: u32) -> String {
    format!("Lives: {}", hearts(lives))
}

/// Score and life text shown beside the playfield.
///
/// Text is rebuilt only when the underlying value changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    score: Option<u32>,
    lives: Option<u32>,
    score_text: String,
    lives_text: String,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, score: u32, lives: u32) {
        if self.score != Some(score) {
            self.score = Some(score);
            self.score_text = score_label(score);
        }
        if self.lives != Some(lives) {
            self.lives = Some(lives);
            self.lives_text = hearts(lives);
        }
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    pub fn lives_text(&self) -> &str {
        &self.lives_text
    }
}
