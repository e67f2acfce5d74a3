//! Text art for the flower image keys (`flowerN`, `wiltN`).
//!
//! Leaves hang off the stem in pairs, filled from the bottom up, so the
//! flower has room for eight of them.

/// Leaves the art has room for
pub const LEAF_SLOTS: u8 = 8;

const LEFT_LEAF: &str = "~~\\";
const RIGHT_LEAF: &str = "/~~";
const LEFT_FALLING: &str = ",' ";
const RIGHT_FALLING: &str = " ',";
const NO_LEAF: &str = "   ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Image {
    Flower(u8),
    Wilt(u8),
    /// Anything we have no art for
    Pot,
}

impl Image {
    pub fn from_key(key: &str) -> Self {
        let parse = |n: &str| n.parse::<u8>().ok().filter(|n| *n <= LEAF_SLOTS);
        if let Some(n) = key.strip_prefix("flower").and_then(parse) {
            Image::Flower(n)
        } else if let Some(n) = key.strip_prefix("wilt").and_then(parse) {
            Image::Wilt(n)
        } else {
            Image::Pot
        }
    }

    pub fn is_wilting(self) -> bool {
        matches!(self, Image::Wilt(_))
    }
}

/// Lines of art for `key`, top to bottom
pub fn render_key(key: &str) -> Vec<String> {
    render(Image::from_key(key))
}

pub fn render(image: Image) -> Vec<String> {
    let (leaves, falling) = match image {
        Image::Flower(n) => (n, None),
        Image::Wilt(n) => (n, Some(n).filter(|n| *n < LEAF_SLOTS)),
        Image::Pot => return pot(),
    };

    let mut lines = bloom(leaves);

    // bottom pair of slots is 0 and 1, so walk the rows top down
    for row in (0..LEAF_SLOTS / 2).rev() {
        let left = row * 2;
        let right = left + 1;
        let slot = |i: u8, leaf: &'static str, fall: &'static str| {
            if i < leaves {
                leaf
            } else if falling == Some(i) {
                fall
            } else {
                NO_LEAF
            }
        };
        lines.push(format!(
            "  {}|{}",
            slot(left, LEFT_LEAF, LEFT_FALLING),
            slot(right, RIGHT_LEAF, RIGHT_FALLING)
        ));
    }

    lines.extend(pot());
    lines
}

fn bloom(leaves: u8) -> Vec<String> {
    let centre = if leaves == 0 { 'x' } else { '@' };
    vec![
        "    .-.".to_string(),
        format!("   ( {} )", centre),
        "    '-'".to_string(),
    ]
}

fn pot() -> Vec<String> {
    vec!["  [=====]".to_string(), "   \\___/".to_string()]
}
