use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub src: AttrValue,
    pub caption: AttrValue,
}

#[derive(PartialEq, Properties)]
pub struct CarouselProps {
    /// 不带 id 的容器只会作为旧版单实例被启动
    #[prop_or_default]
    pub id: Option<AttrValue>,
    pub slides: Rc<Vec<Slide>>,
}

/// Markup a carousel instance binds to: stage, items, two nav buttons and
/// an empty indicator box. Position classes are applied later by the
/// bootstrap, never by this component.
#[function_component]
pub fn Carousel(props: &CarouselProps) -> Html {
    let suffix = props
        .id
        .as_ref()
        .map(|id| format!("-{id}"))
        .unwrap_or_default();

    html! {
        <div class="carousel-container" id={props.id.clone()}>
            <div class="carousel-stage">
                {props.slides.iter().map(|slide| html! {
                    <div class="carousel-image">
                        <img src={slide.src.clone()} alt={slide.caption.clone()} draggable="false" />
                        <div class="carousel-caption">{slide.caption.clone()}</div>
                    </div>
                }).collect::<Html>()}
            </div>
            <button class="nav-btn prev" id={format!("prevBtn{suffix}")} aria-label="Previous">{"‹"}</button>
            <button class="nav-btn next" id={format!("nextBtn{suffix}")} aria-label="Next">{"›"}</button>
            <div class="carousel-indicators"></div>
        </div>
    }
}

/// Five placeholder slides served from `/assets/slides`.
pub fn demo_slides(group: &str) -> Rc<Vec<Slide>> {
    Rc::new(
        (1..=5)
            .map(|n| Slide {
                src: format!("/assets/slides/{group}-{n}.jpg").into(),
                caption: format!("{group} #{n}").into(),
            })
            .collect(),
    )
}
