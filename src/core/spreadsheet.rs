use crate::utils::error::{RecommendError, Result};
use quick_xml::events::{BytesStart, Event};
use std::io::{Cursor, Read};

const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const WORKSHEET_PREFIX: &str = "xl/worksheets/sheet";

type Workbook<'a> = zip::ZipArchive<Cursor<&'a [u8]>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Shared,
    Inline,
    Plain,
}

fn spreadsheet_error(message: impl std::fmt::Display) -> RecommendError {
    RecommendError::SpreadsheetError {
        message: message.to_string(),
    }
}

/// Column A of the first worksheet, header row skipped, in sheet order.
///
/// A row without a value in column A yields an empty title so row
/// positions line up with the workbook.
pub fn read_first_column(bytes: &[u8]) -> Result<Vec<String>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(spreadsheet_error)?;

    let shared_strings = match read_entry(&mut archive, SHARED_STRINGS)? {
        Some(xml) => parse_shared_strings(&xml)?,
        None => Vec::new(),
    };

    let sheet_name = first_worksheet(&archive)
        .ok_or_else(|| spreadsheet_error("workbook has no worksheets"))?;
    let sheet_xml = read_entry(&mut archive, &sheet_name)?
        .ok_or_else(|| spreadsheet_error(format!("missing {}", sheet_name)))?;

    let rows = parse_first_column(&sheet_xml, &shared_strings)?;
    tracing::debug!("Read {} rows from {}", rows.len(), sheet_name);

    Ok(rows
        .into_iter()
        .skip(1)
        .map(|title| title.trim().to_string())
        .collect())
}

fn read_entry(archive: &mut Workbook<'_>, name: &str) -> Result<Option<Vec<u8>>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(spreadsheet_error(e)),
    };
    let mut data = Vec::new();
    entry.read_to_end(&mut data)?;
    Ok(Some(data))
}

// sheet1.xml, sheet2.xml, ... sheet10.xml 依數字排序
fn first_worksheet(archive: &Workbook<'_>) -> Option<String> {
    archive
        .file_names()
        .filter(|name| name.starts_with(WORKSHEET_PREFIX) && name.ends_with(".xml"))
        .min_by_key(|name| {
            name.trim_start_matches(WORKSHEET_PREFIX)
                .trim_end_matches(".xml")
                .parse::<u32>()
                .unwrap_or(u32::MAX)
        })
        .map(|name| name.to_string())
}

fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"t" => in_text = current.is_some(),
                _ => {}
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Ok(Event::Text(te)) if in_text => {
                let text = te.unescape().map_err(spreadsheet_error)?;
                if let Some(current) = current.as_mut() {
                    // rich text 會拆成多個 <r><t>
                    current.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"si" => strings.extend(current.take()),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(spreadsheet_error(e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(strings)
}

fn is_column_a(cell: &BytesStart<'_>, position_in_row: usize) -> bool {
    let reference = cell
        .attributes()
        .flatten()
        .find(|a| a.key.as_ref() == b"r")
        .map(|a| a.value.into_owned());

    match reference {
        Some(reference) => {
            let column: Vec<u8> = reference
                .into_iter()
                .take_while(|b| b.is_ascii_alphabetic())
                .collect();
            column.eq_ignore_ascii_case(b"A")
        }
        None => position_in_row == 0,
    }
}

fn cell_kind(cell: &BytesStart<'_>) -> CellKind {
    let kind = cell
        .attributes()
        .flatten()
        .find(|a| a.key.as_ref() == b"t")
        .map(|a| a.value.into_owned());

    match kind.as_deref() {
        Some(b"s") => CellKind::Shared,
        Some(b"inlineStr") => CellKind::Inline,
        _ => CellKind::Plain,
    }
}

/// One entry per `<row>` element: the text of its column-A cell, or empty.
fn parse_first_column(xml: &[u8], shared_strings: &[String]) -> Result<Vec<String>> {
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut rows = Vec::new();

    let mut row: Option<String> = None;
    let mut cells_in_row = 0usize;
    let mut in_column_a = false;
    let mut kind = CellKind::Plain;
    let mut in_value = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"row" => {
                    row = Some(String::new());
                    cells_in_row = 0;
                }
                b"c" => {
                    in_column_a = is_column_a(&e, cells_in_row);
                    kind = cell_kind(&e);
                    cells_in_row += 1;
                }
                b"v" => in_value = kind != CellKind::Inline,
                b"t" => in_value = kind == CellKind::Inline,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"row" => rows.push(String::new()),
                b"c" => cells_in_row += 1,
                _ => {}
            },
            Ok(Event::Text(te)) if in_value && in_column_a => {
                let text = te.unescape().map_err(spreadsheet_error)?;
                let value = if kind == CellKind::Shared {
                    text.trim()
                        .parse::<usize>()
                        .ok()
                        .and_then(|index| shared_strings.get(index))
                        .cloned()
                        .ok_or_else(|| {
                            spreadsheet_error(format!("bad shared string index '{}'", text))
                        })?
                } else {
                    text.into_owned()
                };
                if let Some(row) = row.as_mut() {
                    row.push_str(&value);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => in_column_a = false,
                b"row" => rows.extend(row.take()),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(spreadsheet_error(e)),
            _ => {}
        }
        buf.clear();
    }
    Ok(rows)
}
