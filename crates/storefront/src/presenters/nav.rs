//! Navigation presenter.
//!
//! Pure render function of `(authenticated, current_path)`: the login slot
//! flips between a login link and a logout action, and every other link is
//! marked active iff the current path ends with its target.

use askama::Template;

use crate::config::StorefrontConfig;

/// One navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    pub label: String,
    pub href: String,
    pub active: bool,
    /// Marks the logout action so the active-link pass always skips it.
    pub logout: bool,
}

/// Navigation display data.
#[derive(Debug, Clone)]
pub struct NavView {
    pub links: Vec<NavLinkView>,
}

impl NavView {
    /// Build the navigation for the given auth state and current path.
    #[must_use]
    pub fn build(authenticated: bool, current_path: &str, config: &StorefrontConfig) -> Self {
        let pages = &config.pages;
        let mut links: Vec<NavLinkView> = [
            ("Home", &pages.home),
            ("Menu", &pages.menu),
            ("Cart", &pages.cart),
            ("Orders", &pages.orders),
        ]
        .into_iter()
        .map(|(label, href)| NavLinkView {
            label: label.to_owned(),
            href: href.clone(),
            active: current_path.ends_with(href.as_str()),
            logout: false,
        })
        .collect();

        if authenticated {
            links.push(NavLinkView {
                label: "Logout".to_owned(),
                href: "#".to_owned(),
                active: false,
                logout: true,
            });
        } else {
            links.push(NavLinkView {
                label: "Login".to_owned(),
                href: pages.login.clone(),
                active: config.is_login_page(current_path),
                logout: false,
            });
        }

        Self { links }
    }
}

/// Navigation fragment template.
#[derive(Template)]
#[template(path = "partials/nav.html")]
pub struct NavTemplate {
    pub nav: NavView,
}
