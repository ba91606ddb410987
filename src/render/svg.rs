//! SVG canvas backend.
//!
//! Builds an in-memory element tree with one `<g>` group per symbol and one
//! child element per drawing primitive, then serializes it with the
//! `xmlwriter` crate. The tree itself stays accessible after generation so
//! callers can graft it into a larger document.

use crate::error::{Error, Result};
use crate::model::{BarcodeDimension, Orientation, TextAlignment};

use super::canvas::Canvas;
use super::text;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A node in the generated SVG document tree.
#[derive(Debug, Clone)]
pub struct SvgElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<SvgElement>,
    text: Option<String>,
}

impl SvgElement {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.push((key.to_string(), value.into()));
        self
    }

    /// Element name (without namespace prefix).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[SvgElement] {
        &self.children
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn write(&self, xml: &mut xmlwriter::XmlWriter, prefix: Option<&str>) {
        let qualified = match prefix {
            Some(p) => format!("{p}:{}", self.name),
            None => self.name.clone(),
        };
        xml.start_element(&qualified);
        for (key, value) in &self.attributes {
            xml.write_attribute(key, value);
        }
        if let Some(content) = &self.text {
            xml.write_text(content);
        }
        for child in &self.children {
            child.write(xml, prefix);
        }
        xml.end_element();
    }
}

/// Canvas backend producing an SVG document tree.
#[derive(Debug)]
pub struct SvgCanvas {
    namespace: bool,
    prefix: Option<String>,
    root: Option<SvgElement>,
}

impl SvgCanvas {
    /// Create a namespace-aware SVG canvas without a prefix.
    pub fn new() -> Self {
        Self {
            namespace: true,
            prefix: None,
            root: None,
        }
    }

    /// Create a canvas with explicit namespace handling.
    ///
    /// A namespace prefix without namespace support is rejected before any
    /// drawing starts.
    pub fn with_namespace(namespace: bool, prefix: Option<&str>) -> Result<Self> {
        if !namespace && prefix.is_some() {
            return Err(Error::CanvasSetup(
                "namespace prefix requires namespace support".to_string(),
            ));
        }
        if let Some(p) = prefix {
            if p.is_empty() || p.contains(':') {
                return Err(Error::CanvasSetup(format!("invalid namespace prefix {p:?}")));
            }
        }
        Ok(Self {
            namespace,
            prefix: prefix.map(str::to_string),
            root: None,
        })
    }

    /// The finished document tree. `None` before `establish_dimensions`.
    pub fn root(&self) -> Option<&SvgElement> {
        self.root.as_ref()
    }

    /// The symbol group inside the root element.
    pub fn group(&self) -> Option<&SvgElement> {
        self.root.as_ref().and_then(|r| r.children.first())
    }

    /// Serialize the document tree to an XML fragment.
    pub fn to_xml(&self) -> Result<String> {
        let root = self.root.as_ref().ok_or_else(|| {
            Error::CanvasSetup("no symbol has been generated yet".to_string())
        })?;
        let mut xml = xmlwriter::XmlWriter::new(xmlwriter::Options::default());
        root.write(&mut xml, self.prefix.as_deref());
        Ok(xml.end_document())
    }

    fn group_mut(&mut self) -> Result<&mut SvgElement> {
        self.root
            .as_mut()
            .and_then(|r| r.children.first_mut())
            .ok_or_else(|| {
                Error::CanvasSetup("drawing primitive before establish_dimensions".to_string())
            })
    }
}

impl Default for SvgCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for SvgCanvas {
    fn establish_dimensions(
        &mut self,
        dim: &BarcodeDimension,
        orientation: Orientation,
    ) -> Result<()> {
        let width = dim.width_plus_quiet_for(orientation);
        let height = dim.height_plus_quiet_for(orientation);

        let mut root = SvgElement::new("svg")
            .attr("width", format!("{width}mm"))
            .attr("height", format!("{height}mm"))
            .attr("viewBox", format!("0 0 {width} {height}"));
        if self.namespace {
            let key = match &self.prefix {
                Some(p) => format!("xmlns:{p}"),
                None => "xmlns".to_string(),
            };
            root.attributes.insert(0, (key, SVG_NAMESPACE.to_string()));
        }

        let w = dim.width_plus_quiet;
        let h = dim.height_plus_quiet;
        let mut group = SvgElement::new("g").attr("fill", "black").attr("stroke", "none");
        let transform = match orientation {
            Orientation::Deg0 => None,
            Orientation::Deg90 => Some(format!("translate(0 {w}) rotate(-90)")),
            Orientation::Deg180 => Some(format!("translate({w} {h}) rotate(180)")),
            Orientation::Deg270 => Some(format!("translate({h} 0) rotate(90)")),
        };
        if let Some(t) = transform {
            group = group.attr("transform", t);
        }

        root.children.push(group);
        self.root = Some(root);
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        let rect = SvgElement::new("rect")
            .attr("x", x.to_string())
            .attr("y", y.to_string())
            .attr("width", w.to_string())
            .attr("height", h.to_string());
        self.group_mut()?.children.push(rect);
        Ok(())
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        let rect = SvgElement::new("rect")
            .attr("x", x.to_string())
            .attr("y", y.to_string())
            .attr("width", w.to_string())
            .attr("height", h.to_string())
            .attr("fill", "none")
            .attr("stroke", "black");
        self.group_mut()?.children.push(rect);
        Ok(())
    }

    fn draw_text(
        &mut self,
        content: &str,
        x1: f64,
        x2: f64,
        y: f64,
        font_name: &str,
        font_size: f64,
        align: TextAlignment,
    ) -> Result<()> {
        let advances = vec![text::nominal_advance(font_size); content.chars().count()];
        let positions = text::glyph_positions(&advances, x1, x2, align);
        let xs = positions
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let mut element = SvgElement::new("text")
            .attr("x", xs)
            .attr("y", y.to_string())
            .attr("font-family", font_name)
            .attr("font-size", font_size.to_string());
        element.text = Some(content.to_string());
        self.group_mut()?.children.push(element);
        Ok(())
    }
}
