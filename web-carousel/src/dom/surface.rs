use carousel::{Position, Surface};
use web_sys::{Document, Element};

/// 把位置映射写到页面元素的 class 上
pub struct DomSurface {
    document: Document,
    items: Vec<Element>,
    indicator_box: Element,
    indicators: Vec<Element>,
}

impl DomSurface {
    pub fn new(document: Document, items: Vec<Element>, indicator_box: Element) -> Self {
        Self {
            document,
            items,
            indicator_box,
            indicators: Vec::new(),
        }
    }

    pub fn indicators(&self) -> &[Element] {
        &self.indicators
    }
}

impl Surface for DomSurface {
    fn place_item(&mut self, item: usize, from: Option<Position>, to: Position) {
        let Some(element) = self.items.get(item) else {
            return;
        };
        let class_list = element.class_list();
        match from {
            Some(from) => _ = class_list.remove_1(from.class_name()),
            None => {
                for position in Position::ALL {
                    _ = class_list.remove_1(position.class_name());
                }
            }
        }
        _ = class_list.add_1(to.class_name());
        _ = element.set_attribute("data-position", &to.index().to_string());
    }

    fn build_indicators(&mut self, count: usize, active: usize) {
        self.indicator_box.set_inner_html("");
        self.indicators.clear();
        for index in 0..count {
            let dot = match self.document.create_element("div") {
                Ok(dot) => dot,
                Err(e) => {
                    log::error!("create indicator error: {e:?}");
                    continue;
                }
            };
            dot.set_class_name(if index == active {
                "indicator active"
            } else {
                "indicator"
            });
            _ = dot.set_attribute("data-index", &index.to_string());
            if let Err(e) = self.indicator_box.append_child(&dot) {
                log::error!("append indicator error: {e:?}");
                continue;
            }
            self.indicators.push(dot);
        }
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if let Some(dot) = self.indicators.get(index) {
            _ = dot.class_list().toggle_with_force("active", active);
        }
    }

    fn page_hidden(&self) -> bool {
        self.document.hidden()
    }
}
