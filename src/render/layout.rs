use super::banner::BannerGenerator;
use crate::carousel::{DisplaySize, Measure, WordList};
use unicode_width::UnicodeWidthStr;

/// A block of text rows, measured once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBlock {
    rows: Vec<String>,
    width: u16,
}

impl TextBlock {
    pub(crate) fn new(rows: Vec<String>) -> Self {
        let width = rows.iter().map(|row| row.width()).max().unwrap_or(0);
        Self { rows, width: u16::try_from(width).unwrap_or(u16::MAX) }
    }

    pub(crate) fn rows(&self) -> &[String] {
        &self.rows
    }

    pub(crate) fn size(&self) -> DisplaySize {
        DisplaySize { width: self.width, height: u16::try_from(self.rows.len()).unwrap_or(u16::MAX) }
    }
}

/// How hero text is drawn.
pub(crate) enum Lettering<'a> {
    Plain,
    Banner(&'a BannerGenerator),
}

impl Lettering<'_> {
    fn render(&self, text: &str) -> TextBlock {
        match self {
            Self::Plain => TextBlock::new(vec![text.to_string()]),
            Self::Banner(generator) => match generator.generate(text) {
                Ok(rows) => TextBlock::new(rows),
                Err(e) => {
                    log::warn!("{e}; leaving it unrendered");
                    TextBlock::default()
                }
            },
        }
    }
}

/// The rendered hero line: static prefix and suffix around one block per carousel word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HeroLayout {
    prefix: TextBlock,
    suffix: TextBlock,
    words: Vec<TextBlock>,
}

impl HeroLayout {
    pub(crate) fn new(prefix: &str, suffix: &str, words: &WordList, lettering: &Lettering) -> Self {
        Self {
            prefix: lettering.render(prefix),
            suffix: lettering.render(suffix),
            words: words.iter().map(|word| lettering.render(word)).collect(),
        }
    }

    pub(crate) fn prefix(&self) -> &TextBlock {
        &self.prefix
    }

    pub(crate) fn suffix(&self) -> &TextBlock {
        &self.suffix
    }

    pub(crate) fn word(&self, index: usize) -> Option<&TextBlock> {
        self.words.get(index)
    }

    /// Rows needed to draw the tallest piece of the line.
    pub(crate) fn line_height(&self) -> u16 {
        std::iter::once(&self.prefix)
            .chain(&self.words)
            .chain(std::iter::once(&self.suffix))
            .map(|block| block.size().height)
            .max()
            .unwrap_or(0)
    }
}

impl Measure for HeroLayout {
    fn measure(&self, index: usize) -> DisplaySize {
        self.word(index).map(TextBlock::size).unwrap_or_default()
    }
}
