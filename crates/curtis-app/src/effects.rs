//! Small terminal flourishes triggered by words in Curtis's replies.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasterEgg {
    Balloons,
    Snow,
}

impl EasterEgg {
    pub fn banner(self) -> &'static str {
        match self {
            EasterEgg::Balloons => "  🎈   🎈 🎈   🎈",
            EasterEgg::Snow => "  ❄  ❅   ❆  ❄  ❅",
        }
    }
}

/// Flourishes for a reply. Only whole, space-delimited words count.
pub fn detect(reply: &str) -> Vec<EasterEgg> {
    let mut eggs = Vec::new();
    if reply.contains(" balloons ") {
        eggs.push(EasterEgg::Balloons);
    }
    if reply.contains(" snow ") {
        eggs.push(EasterEgg::Snow);
    }
    eggs
}
