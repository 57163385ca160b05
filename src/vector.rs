//!decomposition of vector field strings like "3i+4j" or "-y*e_x+x*e_y" into per axis scalar expressions
use crate::expr::{Expression, Lexer, Token};
use crate::types::Vec3;
use log::{debug, warn};
///below this magnitude normalized returns the zero vector
pub const EPSILON: f64 = 1e-12;
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Convention {
    ///terms end in i, j or k
    #[default]
    UnitVectors,
    ///terms end in e_x, e_y or e_z
    Subscript,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}
impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}
impl Convention {
    fn marker(self, c: char) -> Option<Axis> {
        match (self, c) {
            (Convention::UnitVectors, 'i') | (Convention::Subscript, 'x') => Some(Axis::X),
            (Convention::UnitVectors, 'j') | (Convention::Subscript, 'y') => Some(Axis::Y),
            (Convention::UnitVectors, 'k') | (Convention::Subscript, 'z') => Some(Axis::Z),
            _ => None,
        }
    }
    ///splits a normalized term into its axis and the text before the marker
    fn split_marker(self, term: &str) -> Option<(Axis, &str)> {
        match self {
            Convention::UnitVectors => {
                let (pos, name) = Lexer::new(term)
                    .filter_map(|(pos, t)| match t {
                        Token::Ident(name) => Some((pos, name)),
                        _ => None,
                    })
                    .last()?;
                if pos + name.len() != term.len() {
                    return None;
                }
                let mut chars = name.chars();
                let last = chars.next_back()?;
                let axis = self.marker(last)?;
                match chars.as_str() {
                    "" => Some((axis, &term[..pos])),
                    //an attached variable must start its own factor
                    "x" | "y" | "z"
                        if term[..pos].chars().next_back().is_none_or(|c| {
                            matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | ',' | '·' | '⋅')
                        }) =>
                    {
                        Some((axis, &term[..pos + 1]))
                    }
                    _ => None,
                }
            }
            Convention::Subscript => {
                let last = term.chars().next_back()?;
                let axis = self.marker(last)?;
                let head = term[..term.len() - 1].strip_suffix("e_")?;
                Some((axis, head))
            }
        }
    }
}
///the axis a field component is read from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldComponent {
    X,
    Y,
    Z,
    #[default]
    Magnitude,
}
///up to three scalar component expressions, an absent component is 0
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorField {
    components: [Option<Expression>; 3],
}
impl VectorField {
    pub fn new(x: Option<Expression>, y: Option<Expression>, z: Option<Expression>) -> Self {
        Self {
            components: [x, y, z],
        }
    }
    pub fn component(&self, axis: Axis) -> Option<&Expression> {
        self.components[axis.index()].as_ref()
    }
    ///the present component expressions in axis order
    pub fn components(&self) -> impl Iterator<Item = &Expression> {
        self.components.iter().flatten()
    }
    ///weather a z component is present
    pub fn is_3d(&self) -> bool {
        self.components[2].is_some()
    }
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> Vec3 {
        let f = |c: &Option<Expression>| c.as_ref().map_or(0.0, |e| e.evaluate(x, y, z));
        Vec3::new(
            f(&self.components[0]),
            f(&self.components[1]),
            f(&self.components[2]),
        )
    }
    pub fn magnitude(&self, x: f64, y: f64, z: f64) -> f64 {
        self.evaluate(x, y, z).norm()
    }
    pub fn normalized(&self, x: f64, y: f64, z: f64) -> Vec3 {
        let v = self.evaluate(x, y, z);
        let m = v.norm();
        if m < EPSILON { Vec3::default() } else { v / m }
    }
    pub fn component_value(&self, component: FieldComponent, x: f64, y: f64, z: f64) -> f64 {
        let v = self.evaluate(x, y, z);
        match component {
            FieldComponent::X => v.x,
            FieldComponent::Y => v.y,
            FieldComponent::Z => v.z,
            FieldComponent::Magnitude => v.norm(),
        }
    }
}
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VectorFieldParser {
    pub convention: Convention,
}
fn normalize(expr: &str) -> String {
    expr.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
///splits at + and - that are outside parenthesis and not a unary sign,
///each term keeps its leading sign
fn split_terms(s: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let (mut depth, mut start) = (0usize, 0);
    let mut prev: Option<char> = None;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '+' | '-'
                if depth == 0
                    && !matches!(prev, None | Some('*' | '/' | '^' | '(' | ',' | '+' | '-')) =>
            {
                terms.push(&s[start..i]);
                start = i;
            }
            _ => {}
        }
        prev = Some(c);
    }
    terms.push(&s[start..]);
    terms.retain(|t| !t.is_empty());
    terms
}
fn coefficient(head: &str) -> String {
    let head = head
        .strip_suffix(['*', '·', '⋅'])
        .unwrap_or(head);
    match head {
        "" | "+" => "1".to_string(),
        "-" => "-1".to_string(),
        _ => head.to_string(),
    }
}
impl VectorFieldParser {
    pub fn new(convention: Convention) -> Self {
        Self { convention }
    }
    ///cheap textual check for a marker right before +, - or the end,
    ///may report true for strings parse rejects such as "x+pi"
    pub fn is_vector_field(&self, expr: &str) -> bool {
        let s = normalize(expr);
        let chars: Vec<char> = s.chars().collect();
        chars.iter().enumerate().any(|(i, c)| {
            let boundary = matches!(chars.get(i + 1), None | Some('+' | '-'));
            let marked = match self.convention {
                Convention::UnitVectors => true,
                Convention::Subscript => i >= 2 && chars[i - 2] == 'e' && chars[i - 1] == '_',
            };
            boundary && marked && self.convention.marker(*c).is_some()
        })
    }
    ///decomposes expr into per axis expressions, None if no term carries a marker
    ///
    ///when an axis appears in several terms the last one wins
    pub fn parse(&self, expr: &str) -> Option<VectorField> {
        let s = normalize(expr);
        let mut components: [Option<Expression>; 3] = Default::default();
        let mut found = false;
        for term in split_terms(&s) {
            let Some((axis, head)) = self.convention.split_marker(term) else {
                debug!("dropping term without axis marker: {term}");
                continue;
            };
            let slot = &mut components[axis.index()];
            if let Some(old) = slot {
                warn!(
                    "axis {axis:?} given twice in {expr:?}, {:?} replaces {:?}",
                    head,
                    old.as_str()
                );
            }
            *slot = Some(Expression::new(coefficient(head)));
            found = true;
        }
        let [x, y, z] = components;
        found.then(|| VectorField::new(x, y, z))
    }
}
///is_vector_field with the default convention
pub fn is_vector_field(expr: &str) -> bool {
    VectorFieldParser::default().is_vector_field(expr)
}
///parse with the default convention
pub fn parse(expr: &str) -> Option<VectorField> {
    VectorFieldParser::default().parse(expr)
}
