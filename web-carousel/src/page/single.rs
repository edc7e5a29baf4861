use crate::bootstrap::use_carousels;
use crate::component::*;
use yew::prelude::*;

/// Old single-carousel markup: a container without an id.
#[function_component]
pub fn SinglePage() -> Html {
    use_carousels();

    html! {
        <>
            <Title title="3D Carousel" />
            <div class="container-sm" style="padding-top: 1em; padding-bottom: 1em;">
                <Carousel slides={demo_slides("single")} />
            </div>
        </>
    }
}
