use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    NodeId,
    core::{Core, node::NodeKind},
    error::{Error, Result},
};

/// Render the subtree at `root` as an indented listing of names, kinds and
/// resolved geometry, with status flags. This is a debug function.
pub fn dump(core: &Core, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, core, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Same as [`dump`] without color codes.
pub fn dump_plain(core: &Core, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, core, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Map buffer write failures into render errors.
fn io_err(e: io::Error) -> Error {
    Error::Render(e.to_string())
}

/// Write `text` in a color, then reset.
fn colored(buffer: &mut Buffer, color: Color, bold: bool, text: &str) -> io::Result<()> {
    buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))?;
    write!(buffer, "{text}")?;
    buffer.reset()
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(buffer: &mut Buffer, core: &Core, node_id: NodeId, level: usize) -> Result<()> {
    let node = core.node(node_id).ok_or(Error::NodeNotFound(node_id))?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}").map_err(io_err)?;
    colored(buffer, Color::Cyan, true, node.name().as_str()).map_err(io_err)?;
    let kind = match node.kind() {
        NodeKind::Leaf => "leaf",
        NodeKind::Container => "container",
    };
    write!(buffer, " ({kind})").map_err(io_err)?;

    let mut indicators = Vec::new();
    if node.dirty() {
        indicators.push(("dirty", Color::Red));
    }
    if !node.visible() {
        indicators.push(("hidden", Color::Yellow));
    }
    if !node.enabled() {
        indicators.push(("disabled", Color::Magenta));
    }
    for (i, (label, color)) in indicators.iter().enumerate() {
        write!(buffer, "{}", if i == 0 { " " } else { ", " }).map_err(io_err)?;
        colored(buffer, *color, false, label).map_err(io_err)?;
    }
    writeln!(buffer).map_err(io_err)?;

    let pos = node.position();
    let size = node.size();
    write!(buffer, "{indent}  ").map_err(io_err)?;
    colored(buffer, Color::Green, false, "rect:").map_err(io_err)?;
    writeln!(buffer, " ({}, {}) {} × {}", pos.x, pos.y, size.x, size.y).map_err(io_err)?;

    for child in node.children() {
        dump_node(buffer, core, *child, level + 1)?;
    }
    Ok(())
}
