//! # Account Administration
//!
//! [`AccountService`] holds the one-shot account operations (create user,
//! password changes, wallet top-up). [`UserAdmin`] is the admin's user lookup
//! panel: it keeps the selected user and re-fetches it after every assignment
//! change so the shown service list is always the server's.

use std::sync::Arc;

use serde_json::Value;
use shared::{
    format_rupees, AddBalanceRequest, AddBalanceResponse, ChangePasswordRequest,
    ChangeUserPasswordRequest, CreateUserRequest, CreateUserResponse, GetUserRequest, Role,
    ServiceAssignmentRequest, UserDetails,
};

use super::events::EventSink;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::utils::validation::{
    validate_account_password, validate_password, validate_user_id, MIN_ACCOUNT_PASSWORD_LEN,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewUserForm {
    pub user_id: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    /// Selected `serviceId`s.
    pub services: Vec<String>,
}

/// Admin reset of another account's password.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordResetForm {
    pub user_id: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// The signed-in user's own password change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Clone)]
pub struct AccountService {
    api: Arc<dyn ApiService>,
    events: EventSink,
}

impl AccountService {
    pub fn new(api: Arc<dyn ApiService>, events: EventSink) -> Self {
        Self { api, events }
    }

    fn reject(&self, message: impl Into<String>) -> AppError {
        let message = message.into();
        self.events.error(message.clone());
        AppError::Validation(message)
    }

    fn api_error(&self, message: String) -> AppError {
        self.events.error(message.clone());
        AppError::Api(message)
    }

    pub async fn create_user(&self, form: &NewUserForm) -> Result<CreateUserResponse> {
        let user_id = form.user_id.trim();
        if let Some(message) = validate_user_id(user_id).error {
            return Err(self.reject(message));
        }
        if let Some(message) = validate_account_password(&form.password, &form.confirm_password).error {
            return Err(self.reject(message));
        }
        if form.services.is_empty() {
            return Err(self.reject("Please select at least one service."));
        }

        let request = CreateUserRequest {
            user_id: user_id.to_string(),
            password: form.password.clone(),
            role: form.role,
            services: form.services.clone(),
        };
        let created = self
            .api
            .create_user(&request)
            .await
            .into_result()
            .map_err(|message| self.api_error(message))?;

        tracing::info!(user_id = %created.user_id, role = form.role.as_str(), "User created");
        self.events.success("User created successfully!");
        self.events.info(format!(
            "User ID: {} Password: {}",
            created.user_id,
            created.password.as_deref().unwrap_or(&form.password)
        ));
        Ok(created)
    }

    pub async fn change_user_password(&self, form: &PasswordResetForm) -> Result<()> {
        if form.user_id.trim().is_empty()
            || form.new_password.trim().is_empty()
            || form.confirm_password.trim().is_empty()
        {
            return Err(self.reject("Please fill in all fields."));
        }
        if form.new_password != form.confirm_password {
            return Err(self.reject("Passwords do not match."));
        }
        if form.new_password.chars().count() < MIN_ACCOUNT_PASSWORD_LEN {
            return Err(self.reject(format!(
                "New password must be at least {} characters long.",
                MIN_ACCOUNT_PASSWORD_LEN
            )));
        }

        let request = ChangeUserPasswordRequest {
            user_id: form.user_id.trim().to_string(),
            new_password: form.new_password.clone(),
        };
        let reply = self
            .api
            .change_user_password(&request)
            .await
            .into_result()
            .map_err(|message| self.api_error(message))?;

        self.events
            .success(server_text(reply).unwrap_or_else(|| "Password changed successfully!".to_string()));
        Ok(())
    }

    pub async fn change_password(&self, form: &PasswordChangeForm) -> Result<()> {
        if form.current_password.is_empty() {
            return Err(self.reject("Current password is required."));
        }
        if let Some(message) = validate_password(&form.new_password).error {
            return Err(self.reject(message));
        }
        if form.new_password != form.confirm_password {
            return Err(self.reject("New password and confirm password do not match."));
        }

        let request = ChangePasswordRequest {
            current_password: form.current_password.clone(),
            new_password: form.new_password.clone(),
        };
        self.api
            .change_password(&request)
            .await
            .into_result()
            .map_err(|message| self.api_error(message))?;

        self.events.success("Password changed successfully!");
        Ok(())
    }

    /// Credit `amount` (raw input) to `user_id`'s wallet.
    pub async fn add_balance(&self, user_id: &str, amount: &str) -> Result<AddBalanceResponse> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(self.reject("User ID cannot be empty."));
        }
        let amount = match amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => return Err(self.reject("Amount must be a positive number.")),
        };

        let request = AddBalanceRequest {
            user_id: user_id.to_string(),
            amount,
        };
        let mut credited = self
            .api
            .add_balance(&request)
            .await
            .into_result()
            .map_err(|message| self.api_error(message))?;

        if credited.user_id.is_empty() {
            credited.user_id = request.user_id.clone();
        }
        if credited.amount <= 0.0 {
            credited.amount = amount;
        }

        tracing::info!(user_id = %credited.user_id, amount = credited.amount, "Wallet credited");
        self.events.success(format!(
            "Added {} to {}'s wallet.",
            format_rupees(credited.amount),
            credited.user_id
        ));
        Ok(credited)
    }
}

/// Some endpoints answer with a bare confirmation string.
fn server_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

pub struct UserAdmin {
    api: Arc<dyn ApiService>,
    events: EventSink,
    selected: Option<UserDetails>,
    pending_assignment: Option<String>,
}

impl UserAdmin {
    pub fn new(api: Arc<dyn ApiService>, events: EventSink) -> Self {
        Self {
            api,
            events,
            selected: None,
            pending_assignment: None,
        }
    }

    pub fn selected_user(&self) -> Option<&UserDetails> {
        self.selected.as_ref()
    }

    pub fn pending_assignment(&self) -> Option<&str> {
        self.pending_assignment.as_deref()
    }

    #[tracing::instrument(skip(self))]
    pub async fn lookup(&mut self, user_id: &str) -> Result<&UserDetails> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            let message = "Please enter a User ID to search.";
            self.events.error(message);
            return Err(AppError::Validation(message.to_string()));
        }

        self.fetch(user_id).await?;
        self.events.success(format!("Data loaded for user: {}", user_id));
        self.selected
            .as_ref()
            .ok_or_else(|| AppError::State("No user selected.".to_string()))
    }

    /// Pick the service to assign next (empty clears the choice).
    pub fn select_assignment(&mut self, service_id: &str) {
        let service_id = service_id.trim();
        self.pending_assignment = (!service_id.is_empty()).then(|| service_id.to_string());
    }

    pub async fn assign_selected(&mut self) -> Result<()> {
        let (user_id, service_id) = match (&self.selected, &self.pending_assignment) {
            (Some(user), Some(service_id)) => (user.user_id.clone(), service_id.clone()),
            _ => {
                let message = "Please select a service and ensure a user is selected.";
                self.events.error(message);
                return Err(AppError::Validation(message.to_string()));
            }
        };

        let request = ServiceAssignmentRequest {
            user_id: user_id.clone(),
            service_id,
        };
        if let Err(message) = self.api.assign_service(&request).await.into_result() {
            self.events.error(message.clone());
            return Err(AppError::Api(message));
        }

        self.events.success(format!("Service assigned to {}!", user_id));
        self.pending_assignment = None;
        self.fetch(&user_id).await
    }

    pub async fn unassign(&mut self, service_id: &str) -> Result<()> {
        let Some(user) = &self.selected else {
            return Err(AppError::State("No user selected.".to_string()));
        };
        let user_id = user.user_id.clone();
        let name = user
            .services
            .iter()
            .find(|service| service.service_id == service_id)
            .map(|service| service.name.clone())
            .unwrap_or_else(|| service_id.to_string());

        let request = ServiceAssignmentRequest {
            user_id: user_id.clone(),
            service_id: service_id.to_string(),
        };
        if let Err(message) = self.api.unassign_service(&request).await.into_result() {
            self.events.error(message.clone());
            return Err(AppError::Api(message));
        }

        self.events.success(format!("Service \"{}\" removed from user!", name));
        self.fetch(&user_id).await
    }

    /// Drop a service deleted from the catalog from the selected user's view.
    pub fn forget_service(&mut self, service_id: &str) {
        if let Some(user) = &mut self.selected {
            user.services.retain(|service| service.service_id != service_id);
        }
        if self.pending_assignment.as_deref() == Some(service_id) {
            self.pending_assignment = None;
        }
    }

    async fn fetch(&mut self, user_id: &str) -> Result<()> {
        let request = GetUserRequest {
            user_id: user_id.to_string(),
        };
        match self.api.get_user(&request).await.into_result() {
            Ok(details) => {
                tracing::debug!(user_id, services = details.services.len(), "Loaded user");
                self.selected = Some(details);
                Ok(())
            }
            Err(message) => {
                self.events.error(message.clone());
                Err(AppError::Api(message))
            }
        }
    }
}
