use std::sync::Arc;

use dioxus::prelude::*;

use crate::domain::entities::session::SessionStore;
use crate::infra::http::config::Config;
use crate::infra::http::transport::HttpTransport;
use crate::ui::pages::drivers::DriversPage;
use crate::ui::pages::fobs::FobsPage;
use crate::ui::pages::leads::LeadsPage;
use crate::ui::pages::login::LoginPage;
use crate::ui::pages::projects::ProjectsPage;
use crate::ui::pages::routes::RoutesPage;
use crate::ui::pages::trips::TripsPage;
use crate::ui::pages::users::UsersPage;
use crate::ui::pages::vehicles::VehiclesPage;
use crate::usecase::ports::transport::{ApiError, ApiTransport};
use crate::usecase::services::auth_service::AuthService;
use crate::usecase::services::driver_service::DriverService;
use crate::usecase::services::fob_service::FobService;
use crate::usecase::services::lead_service::LeadService;
use crate::usecase::services::lookup_service::LookupService;
use crate::usecase::services::project_service::ProjectService;
use crate::usecase::services::route_service::RouteService;
use crate::usecase::services::trip_service::TripService;
use crate::usecase::services::user_service::UserService;
use crate::usecase::services::vehicle_service::VehicleService;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    LoggedOut,
    LoggedIn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Drivers,
    Vehicles,
    Fobs,
    Routes,
    Trips,
    Leads,
    Projects,
    Users,
}

const NAV_ITEMS: [(Page, &str); 8] = [
    (Page::Drivers, "Drivers"),
    (Page::Vehicles, "Vehicles"),
    (Page::Fobs, "Fobs"),
    (Page::Routes, "Routes"),
    (Page::Trips, "Trips"),
    (Page::Leads, "Leads"),
    (Page::Projects, "Projects"),
    (Page::Users, "Users"),
];

/// One bundle of service handles shared through context so every page talks
/// to the same transport and session.
#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService,
    pub drivers: DriverService,
    pub vehicles: VehicleService,
    pub fobs: FobService,
    pub routes: RouteService,
    pub trips: TripService,
    pub leads: LeadService,
    pub projects: ProjectService,
    pub users: UserService,
    pub lookups: LookupService,
}

impl AppServices {
    pub fn new(transport: Arc<dyn ApiTransport>, session: Arc<SessionStore>) -> Self {
        Self {
            auth: AuthService::new(transport.clone(), session),
            drivers: DriverService::new(transport.clone()),
            vehicles: VehicleService::new(transport.clone()),
            fobs: FobService::new(transport.clone()),
            routes: RouteService::new(transport.clone()),
            trips: TripService::new(transport.clone()),
            leads: LeadService::new(transport.clone()),
            projects: ProjectService::new(transport.clone()),
            users: UserService::new(transport.clone()),
            lookups: LookupService::new(transport),
        }
    }
}

/// The auth phase a failed call leaves the shell in: an expired session
/// drops back to the login screen, anything else stays where it is.
pub fn phase_after_error(err: &ApiError, current: AuthPhase) -> AuthPhase {
    if err.is_unauthorized() {
        AuthPhase::LoggedOut
    } else {
        current
    }
}

/// Routes a failed call to the status line and applies the phase transition.
pub fn report_error(err: &ApiError, mut status_line: Signal<String>, mut auth: Signal<AuthPhase>) {
    status_line.set(err.display_message());
    let current = *auth.peek();
    let next = phase_after_error(err, current);
    if next != current {
        auth.set(next);
    }
}

/// Opens the session store and wires the transport and service bundle around
/// it. One store instance backs everything, so clearing it on logout is seen
/// by the transport's next request.
fn boot_services() -> Result<(Arc<SessionStore>, Arc<dyn ApiTransport>, AppServices), String> {
    let session = Arc::new(
        SessionStore::open_default()
            .map_err(|err| format!("Could not open session storage: {err}"))?,
    );
    let transport: Arc<dyn ApiTransport> = Arc::new(
        HttpTransport::new(Config::from_env(), session.clone())
            .map_err(|err| format!("Could not initialize the API client: {err}"))?,
    );
    let services = AppServices::new(transport.clone(), session.clone());
    Ok((session, transport, services))
}

#[component]
pub fn App() -> Element {
    // Built once per app, not per render; the logout handler below must hold
    // the same session the transport attaches tokens from.
    let (session, transport, services) = match use_hook(boot_services) {
        Ok(parts) => parts,
        Err(message) => {
            return rsx! {
                div {
                    p { "{message}" }
                }
            };
        }
    };

    let auth = use_signal(|| {
        if session.is_authenticated() {
            AuthPhase::LoggedIn
        } else {
            AuthPhase::LoggedOut
        }
    });
    let mut page = use_signal(|| Page::Drivers);

    use_context_provider(|| services.clone());
    use_context_provider(|| transport.clone());
    use_context_provider(|| auth);

    let user_label = session.session().user_name.unwrap_or_default();
    let services_for_logout = services.clone();

    if auth() == AuthPhase::LoggedOut {
        return rsx! {
            LoginPage { auth }
        };
    }

    rsx! {
        div { style: "font-family: sans-serif; min-height: 100vh; background: #f7f8fa;",
            nav { style: "display: flex; gap: 4px; align-items: center; padding: 10px 16px; background: #1f2a44; color: #fff;",
                span { style: "font-weight: 600; margin-right: 16px;", "Fleet Console" }
                for (item, label) in NAV_ITEMS {
                    button {
                        style: if page() == item {
                            "padding: 6px 12px; border: none; border-radius: 6px; background: #2d6cdf; color: #fff; cursor: pointer;"
                        } else {
                            "padding: 6px 12px; border: none; border-radius: 6px; background: transparent; color: #cfd6e4; cursor: pointer;"
                        },
                        onclick: move |_| page.set(item),
                        "{label}"
                    }
                }
                span { style: "margin-left: auto; font-size: 13px; color: #cfd6e4;", "{user_label}" }
                button {
                    style: "padding: 6px 12px; border: 1px solid #cfd6e4; border-radius: 6px; background: transparent; color: #cfd6e4; cursor: pointer;",
                    onclick: move |_| {
                        services_for_logout.auth.logout();
                        let mut auth = auth;
                        auth.set(AuthPhase::LoggedOut);
                    },
                    "Sign out"
                }
            }

            main { style: "padding: 16px;",
                {match page() {
                    Page::Drivers => rsx! { DriversPage {} },
                    Page::Vehicles => rsx! { VehiclesPage {} },
                    Page::Fobs => rsx! { FobsPage {} },
                    Page::Routes => rsx! { RoutesPage {} },
                    Page::Trips => rsx! { TripsPage {} },
                    Page::Leads => rsx! { LeadsPage {} },
                    Page::Projects => rsx! { ProjectsPage {} },
                    Page::Users => rsx! { UsersPage {} },
                }}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::session::Session;

    #[test]
    fn expired_session_drops_to_the_login_phase() {
        let next = phase_after_error(&ApiError::Unauthorized, AuthPhase::LoggedIn);

        assert_eq!(next, AuthPhase::LoggedOut);
    }

    #[test]
    fn other_failures_keep_the_current_phase() {
        let rejected = ApiError::Rejected {
            message: "Vehicle already assigned".to_string(),
        };
        let network = ApiError::Network("timed out".to_string());

        assert_eq!(phase_after_error(&rejected, AuthPhase::LoggedIn), AuthPhase::LoggedIn);
        assert_eq!(phase_after_error(&network, AuthPhase::LoggedIn), AuthPhase::LoggedIn);
        assert_eq!(phase_after_error(&rejected, AuthPhase::LoggedOut), AuthPhase::LoggedOut);
    }

    #[test]
    fn logout_clears_the_session_the_transport_reads() {
        let session = Arc::new(SessionStore::in_memory());
        session.store(Session {
            token: Some("jwt-token".to_string()),
            user_name: Some("Dispatcher".to_string()),
            ..Session::default()
        });
        let transport: Arc<dyn ApiTransport> = Arc::new(
            HttpTransport::new(Config::from_env(), session.clone())
                .expect("client should build"),
        );
        let services = AppServices::new(transport, session.clone());

        services.auth.logout();

        assert_eq!(session.token(), None, "logout must clear the shared store");
        assert!(!session.is_authenticated());
    }
}
