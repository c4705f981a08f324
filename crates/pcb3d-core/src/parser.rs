//! 板标注解析器
//!
//! 两遍匹配：
//! 1. 配对 `TL`/`BR` 标注，得到每块板的范围
//! 2. 解析 `STACK` 标注，挂到目标板的堆叠列表上
//!
//! 未能匹配或格式错误的标注不会中止解析，而是出现在 `ignored` 列表中。
//! 文字完全相同的重复标注只保留第一次出现的位置，且不计入 `ignored`。

use crate::board::{Annotation, BoardDef, BoardDefs, StackedBoard};
use crate::marker::{bottom_right_for, sanitized, Marker, StackMarker, PANEL_FRONT, STACK, TOP_LEFT};
use crate::math::{Bounds, Point2};
use std::collections::BTreeMap;

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBoards {
    pub boards: BoardDefs,
    /// 未被解析的板标注原文
    pub ignored: Vec<String>,
}

/// 标注文字 -> 首次出现的位置
type Bucket<'a> = BTreeMap<&'a str, Point2>;

/// 标注解析器
pub struct AnnotationParser;

impl AnnotationParser {
    /// 解析一组标注
    pub fn parse(annotations: &[Annotation]) -> ParsedBoards {
        let mut ignored = Vec::new();
        let mut top_lefts = Bucket::new();
        let mut bottom_rights = Bucket::new();
        let mut stacks = Bucket::new();

        for annotation in annotations {
            let text = annotation.text.as_str();
            let bucket = match Marker::classify(text) {
                None => continue,
                Some(Marker::TopLeft(_)) => &mut top_lefts,
                Some(Marker::BottomRight(_)) => &mut bottom_rights,
                Some(Marker::Stack(_)) => &mut stacks,
                Some(Marker::Unknown) => {
                    ignored.push(annotation.text.clone());
                    continue;
                }
            };
            bucket.entry(text).or_insert(annotation.position);
        }

        let mut boards = BoardDefs::new();
        Self::resolve_boards(&mut boards, &mut top_lefts, &mut bottom_rights, &mut ignored);
        Self::resolve_stacks(&mut boards, &mut stacks);

        ignored.extend(
            top_lefts
                .keys()
                .chain(bottom_rights.keys())
                .chain(stacks.keys())
                .map(|text| text.to_string()),
        );

        tracing::debug!(
            "Resolved {} boards, {} ignored annotations",
            boards.len(),
            ignored.len()
        );

        ParsedBoards { boards, ignored }
    }

    fn resolve_boards(
        boards: &mut BoardDefs,
        top_lefts: &mut Bucket<'_>,
        bottom_rights: &mut Bucket<'_>,
        ignored: &mut Vec<String>,
    ) {
        top_lefts.retain(|text, top_left| {
            let name = &text[TOP_LEFT.len()..];
            let br_text = bottom_right_for(name);
            let Some(bottom_right) = bottom_rights.remove(br_text.as_str()) else {
                return true;
            };

            let board = BoardDef::new(sanitized(name), Bounds::from_corners(*top_left, bottom_right));
            if boards.contains_key(&board.name) {
                // 不同原文规范化后重名，保留先解析的板
                tracing::debug!("Board name {} already defined, ignoring {}", board.name, text);
                ignored.push(text.to_string());
                ignored.push(br_text);
                return false;
            }

            tracing::debug!("Board {} at {:?}", board.name, board.bounds);
            boards.insert(board.name.clone(), board);
            false
        });
    }

    fn resolve_stacks(boards: &mut BoardDefs, stacks: &mut Bucket<'_>) {
        stacks.retain(|text, position| {
            let marker = match text[STACK.len()..].parse::<StackMarker>() {
                Ok(marker) => marker,
                Err(e) => {
                    tracing::debug!("Malformed stack annotation {}: {}", text, e);
                    return true;
                }
            };

            if marker.other != PANEL_FRONT && !boards.contains_key(&marker.other) {
                tracing::debug!("Unknown stacked board {} in {}", marker.other, text);
                return true;
            }
            let Some(target) = boards.get_mut(&marker.target) else {
                tracing::debug!("Unknown target board {} in {}", marker.target, text);
                return true;
            };
            if target.stacked_boards.iter().any(|s| s.name == marker.other) {
                // 同一目标上的同名堆叠只保留第一个，归档中每个名称只对应一条记录
                tracing::debug!("{} already stacked onto {}, ignoring {}", marker.other, marker.target, text);
                return true;
            }

            let offset = target.local_offset(*position, marker.z_offset);
            target
                .stacked_boards
                .push(StackedBoard::new(marker.other, offset));
            false
        });
    }
}
