use colored::Colorize;
use tickerboard_view::{Block, Region};

/// Terminal rendering of a page, one region after another under its id.
pub(crate) fn page(regions: &[&Region]) -> String {
    let mut lines = Vec::new();
    for region in regions {
        lines.push(format!("#{}", region.id()).dimmed().to_string());
        lines.extend(region.blocks().iter().filter_map(block));
        lines.push(String::new());
    }
    lines.join("\n")
}

fn block(block: &Block) -> Option<String> {
    let line = match block {
        Block::Heading { level, text } if *level <= 3 => text.bold().underline().to_string(),
        Block::Heading { text, .. } => text.bold().to_string(),
        Block::Paragraph(text) => format!("  {text}"),
        Block::Link { href, title } => format!("  {title} <{}>", href.blue().underline()),
        Block::Break => return None,
        Block::Error(message) => format!("  {}", message.red()),
    };
    Some(line)
}
