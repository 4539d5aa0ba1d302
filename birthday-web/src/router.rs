use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    /// Games list.
    #[at("/")]
    Home,
    #[at("/yuval-birthday")]
    Game,
    #[at("/404")]
    #[not_found]
    NotFound,
}
