use web_sys::window;

const AUTH_TOKEN_KEY: &str = "authToken";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save auth token to localStorage
pub fn save_token(token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(AUTH_TOKEN_KEY, token);
    }
}

/// Get auth token from localStorage
pub fn get_token() -> Option<String> {
    get_local_storage()?.get_item(AUTH_TOKEN_KEY).ok()?
}

/// Clear the stored auth token
pub fn clear_token() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(AUTH_TOKEN_KEY);
    }
}
