#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
    JustAsk,
}

impl Author {
    pub fn label(&self) -> &'static str {
        match self {
            Author::User => return "You",
            Author::Assistant => return "AI",
            Author::JustAsk => return "Just Ask AI",
        }
    }
}
