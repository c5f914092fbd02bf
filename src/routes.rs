/// Every page the shell can mount, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Businesses,
    Campaigns,
    Analytics,
    Upload,
    Scanner,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Dashboard,
        Route::Businesses,
        Route::Campaigns,
        Route::Analytics,
        Route::Upload,
        Route::Scanner,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Businesses => "/businesses",
            Route::Campaigns => "/campaigns",
            Route::Analytics => "/analytics",
            Route::Upload => "/upload",
            Route::Scanner => "/scanner",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Businesses => "Businesses",
            Route::Campaigns => "Campaigns",
            Route::Analytics => "Analytics",
            Route::Upload => "CSV Upload",
            Route::Scanner => "Scanner",
        }
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            Route::Dashboard => "view-grid-symbolic",
            Route::Businesses => "system-users-symbolic",
            Route::Campaigns => "mail-send-symbolic",
            Route::Analytics => "utilities-system-monitor-symbolic",
            Route::Upload => "document-send-symbolic",
            Route::Scanner => "system-search-symbolic",
        }
    }

    /// Resolves a path; `/` redirects to the dashboard and unknown paths resolve to nothing.
    pub fn from_path(path: &str) -> Option<Route> {
        if path.is_empty() || path == "/" {
            return Some(Route::Dashboard);
        }
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    pub fn position(self) -> usize {
        Route::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_redirects_to_dashboard() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/upload"), Some(Route::Upload));
        assert_eq!(Route::from_path("/settings"), None);
    }

    #[test]
    fn paths_round_trip_and_positions_match_order() {
        for (idx, route) in Route::ALL.into_iter().enumerate() {
            assert_eq!(Route::from_path(route.path()), Some(route));
            assert_eq!(route.position(), idx);
        }
    }
}
