/// One block of the scope document, in reading order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Organization banner at the top and bottom of the document
    Banner(String),
    Title(String),
    /// Numbered section heading
    Heading { number: usize, title: String },
    Paragraph(String),
    /// Two-column label/value table
    KeyValue(Vec<(String, String)>),
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Bullets(Vec<String>),
    Signature(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Section headings as printed, e.g. "3. QUALIDADE"
    pub fn headings(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { number, title } => Some(format!("{}. {}", number, title)),
                _ => None,
            })
            .collect()
    }

    /// Blocks between the heading titled `title` and the next heading
    pub fn section(&self, title: &str) -> Option<&[Block]> {
        let start = self.blocks.iter().position(
            |block| matches!(block, Block::Heading { title: t, .. } if t == title),
        )? + 1;
        let end = self.blocks[start..]
            .iter()
            .position(|block| matches!(block, Block::Heading { .. } | Block::Banner(_)))
            .map(|offset| start + offset)
            .unwrap_or(self.blocks.len());
        Some(&self.blocks[start..end])
    }

    pub fn has_section(&self, title: &str) -> bool {
        self.section(title).is_some()
    }
}
