use crate::bootstrap::use_carousels;
use crate::component::*;
use yew::prelude::*;

#[function_component]
pub fn ShowcasePage() -> Html {
    use_carousels();

    let go_to_first = Callback::from(|_: MouseEvent| {
        // 与页面脚本调用全局函数的方式一致
        _ = js_sys::eval("window.carouselGoTo && window.carouselGoTo(0, 'carousel2')");
    });

    html! {
        <>
            <Title title="3D Carousel" />
            <div class="container-sm" style="padding-top: 1em; padding-bottom: 1em;">
                <h3>{"Hero"}</h3>
                <Carousel id="carousel-1" slides={demo_slides("hero")} />
                <p class="text-muted">{"Use ← and → to rotate this one."}</p>

                <h3>{"Starts on the right"}</h3>
                <Carousel id="carousel-2" slides={demo_slides("right")} />
                <button type="button" class="btn btn-outline-primary" onclick={go_to_first}>
                    {"Show the first slide"}
                </button>

                <h3>{"Starts on the left"}</h3>
                <Carousel id="carousel-3" slides={demo_slides("left")} />
            </div>
        </>
    }
}
