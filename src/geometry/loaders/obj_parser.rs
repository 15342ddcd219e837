/// OBJ 记录解析器
///
/// 逐行读取 Wavefront OBJ 文本，产出三类原始记录：位置顶点（`v`）、
/// 法线（`vn`）和面（`f`）。其它记录类型（`vt`、`g`、`o`、`usemtl` 等）被静默忽略。
///
/// 面记录中的索引在这里完成 1 基到 0 基的转换，并按“到当前行为止已解析的数量”
/// 做范围检查，所以后续阶段拿到的索引总是有效的。
use std::io::BufRead;
use std::str::{self, FromStr, Utf8Error};

use crate::core::error::{AttributeKind, MeshLoadError, MeshResult};
use crate::math::Vector3;

const POSITION_KEYWORD: &str = "v";
const NORMAL_KEYWORD: &str = "vn";
const FACE_KEYWORD: &str = "f";

/// 面的一个角：位置索引 + 可选的法线索引（均为 0 基）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corner {
    pub position: u32,
    pub normal: Option<u32>,
}

impl Corner {
    pub fn new(position: u32, normal: Option<u32>) -> Self {
        Self { position, normal }
    }
}

/// 一个多边形面（至少 3 个角），保留源文件中的角顺序
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub corners: Vec<Corner>,
    /// 源文件中的行号（1 基）
    pub line: usize,
}

impl Face {
    /// 扇形三角化后的三角形
    pub fn triangles(&self) -> impl Iterator<Item = [Corner; 3]> + '_ {
        fan_triangulate(&self.corners)
    }
}

/// 扇形三角化：角 0 与后续每一对相邻角组成三角形，共 N-2 个，保持原绕序
pub fn fan_triangulate<T: Copy>(corners: &[T]) -> impl Iterator<Item = [T; 3]> + '_ {
    let count = corners.len().saturating_sub(2);
    (1..=count).map(move |i| [corners[0], corners[i], corners[i + 1]])
}

/// 解析结果：位置、法线和面列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjDocument {
    pub positions: Vec<Vector3>,
    pub normals: Vec<Vector3>,
    pub faces: Vec<Face>,
}

impl ObjDocument {
    /// 按解析顺序遍历所有三角形
    pub fn triangles(&self) -> impl Iterator<Item = [Corner; 3]> + '_ {
        self.faces.iter().flat_map(|face| face.triangles())
    }

    /// 只取位置索引的三角形，用于法线合成
    pub fn position_triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangles()
            .map(|[a, b, c]| [a.position, b.position, c.position])
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.corners.len() - 2).sum()
    }

    /// 是否存在没有法线索引的面角
    pub fn has_corners_without_normals(&self) -> bool {
        self.faces
            .iter()
            .flat_map(|f| f.corners.iter())
            .any(|c| c.normal.is_none())
    }
}

/// 从任意 `BufRead` 解析 OBJ 文本
pub fn parse_obj<R: BufRead>(reader: R) -> MeshResult<ObjDocument> {
    let mut parser = ObjParser::default();
    for (index, line) in reader.split(b'\n').enumerate() {
        let bytes = line?;
        let number = index + 1;
        let text = str::from_utf8(&bytes).map_err(|e| invalid_utf8(number, &bytes, e))?;
        parser.parse_line(number, text)?;
    }
    Ok(parser.finish())
}

/// 非 UTF-8 行按格式错误处理，内容以有损方式还原用于定位
fn invalid_utf8(number: usize, bytes: &[u8], error: Utf8Error) -> MeshLoadError {
    let content = String::from_utf8_lossy(bytes).trim().to_string();
    let kind = content.split_whitespace().next().unwrap_or_default().to_string();
    MeshLoadError::MalformedRecord {
        line: number,
        kind,
        content,
        reason: format!("invalid UTF-8 after byte {}", error.valid_up_to()),
    }
}

/// 从字符串解析 OBJ 文本
pub fn parse_obj_str(source: &str) -> MeshResult<ObjDocument> {
    parse_obj(source.as_bytes())
}

/// 逐行解析状态
#[derive(Debug, Default)]
struct ObjParser {
    document: ObjDocument,
}

/// 当前行的上下文，用于构造错误
struct LineContext<'a> {
    number: usize,
    content: &'a str,
    keyword: &'a str,
}

impl LineContext<'_> {
    fn malformed(&self, reason: impl Into<String>) -> MeshLoadError {
        MeshLoadError::MalformedRecord {
            line: self.number,
            kind: self.keyword.to_string(),
            content: self.content.to_string(),
            reason: reason.into(),
        }
    }

    fn out_of_range(&self, attribute: AttributeKind, index: usize, available: usize) -> MeshLoadError {
        MeshLoadError::IndexOutOfRange {
            line: self.number,
            content: self.content.to_string(),
            attribute,
            index,
            available,
        }
    }
}

impl ObjParser {
    fn parse_line(&mut self, number: usize, raw: &str) -> MeshResult<()> {
        let content = raw.trim();
        if content.is_empty() || content.starts_with('#') {
            return Ok(());
        }

        let mut tokens = content.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(());
        };
        let ctx = LineContext { number, content, keyword };

        match keyword {
            POSITION_KEYWORD => {
                let position = parse_vector(&ctx, tokens)?;
                self.document.positions.push(position);
            }
            NORMAL_KEYWORD => {
                let normal = parse_vector(&ctx, tokens)?;
                self.document.normals.push(normal);
            }
            FACE_KEYWORD => {
                let face = self.parse_face(&ctx, tokens)?;
                self.document.faces.push(face);
            }
            // 未识别的记录类型直接忽略
            _ => {}
        }

        Ok(())
    }

    fn parse_face<'a>(
        &self,
        ctx: &LineContext<'_>,
        tokens: impl Iterator<Item = &'a str>,
    ) -> MeshResult<Face> {
        let corners = tokens
            .map(|token| self.parse_corner(ctx, token))
            .collect::<MeshResult<Vec<_>>>()?;

        if corners.len() < 3 {
            return Err(ctx.malformed(format!(
                "a face needs at least 3 corners, found {}",
                corners.len()
            )));
        }

        Ok(Face {
            corners,
            line: ctx.number,
        })
    }

    /// 解析 `p`、`p/t`、`p/t/n` 或 `p//n`
    fn parse_corner(&self, ctx: &LineContext<'_>, token: &str) -> MeshResult<Corner> {
        let mut slots = token.split('/');
        let position_slot = slots.next().unwrap_or_default();
        let _texture_slot = slots.next();
        let normal_slot = slots.next();
        if slots.next().is_some() {
            return Err(ctx.malformed(format!("corner `{}` has more than 3 slots", token)));
        }

        let position = parse_index(ctx, position_slot, AttributeKind::Position)?;
        let position = check_range(ctx, position, self.document.positions.len(), AttributeKind::Position)?;

        let normal = match normal_slot {
            None | Some("") => None,
            Some(slot) => {
                let normal = parse_index(ctx, slot, AttributeKind::Normal)?;
                Some(check_range(ctx, normal, self.document.normals.len(), AttributeKind::Normal)?)
            }
        };

        Ok(Corner::new(position, normal))
    }

    fn finish(self) -> ObjDocument {
        self.document
    }
}

/// 解析恰好 3 个有限浮点数（与区域设置无关，小数点固定为 `.`）
fn parse_vector<'a>(
    ctx: &LineContext<'_>,
    tokens: impl Iterator<Item = &'a str>,
) -> MeshResult<Vector3> {
    let fields: Vec<&str> = tokens.collect();
    if fields.len() != 3 {
        return Err(ctx.malformed(format!(
            "expected 3 numeric fields, found {}",
            fields.len()
        )));
    }

    let mut values = [0.0f32; 3];
    for (value, field) in values.iter_mut().zip(&fields) {
        let parsed = f32::from_str(field)
            .map_err(|_| ctx.malformed(format!("`{}` is not a number", field)))?;
        if !parsed.is_finite() {
            return Err(ctx.malformed(format!("`{}` is not a finite number", field)));
        }
        *value = parsed;
    }

    Ok(Vector3::new(values[0], values[1], values[2]))
}

/// 解析 1 基索引；负数（相对索引）不支持
fn parse_index(ctx: &LineContext<'_>, slot: &str, attribute: AttributeKind) -> MeshResult<usize> {
    if slot.is_empty() {
        return Err(ctx.malformed(format!("missing {} index", attribute)));
    }
    // 只接受纯数字，`usize::from_str` 会放过前导 `+`
    if !slot.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ctx.malformed(format!("invalid {} index `{}`", attribute, slot)));
    }
    slot.parse::<usize>()
        .map_err(|_| ctx.malformed(format!("invalid {} index `{}`", attribute, slot)))
}

/// 1 基索引 -> 0 基索引，超出已解析数量时报错
fn check_range(
    ctx: &LineContext<'_>,
    index: usize,
    available: usize,
    attribute: AttributeKind,
) -> MeshResult<u32> {
    if index == 0 || index > available {
        return Err(ctx.out_of_range(attribute, index, available));
    }
    u32::try_from(index - 1).map_err(|_| ctx.out_of_range(attribute, index, available))
}
