use chrono::Utc;
use std::collections::HashMap;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::core::errors::SalonError;
use crate::core::models::{
    filters::ServiceFilter,
    input::{ServiceInput, ServiceUpdate},
    page::{Page, PageRequest},
    service::{Category, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES, Service, ServiceView},
    stats::{CategoryStats, ServiceStats, average},
    user::User,
};
use crate::core::services::{SalonService, ensure_admin};
use crate::core::validation::Validator;
use crate::infrastructure::storage::Storage;

pub const DEFAULT_SERVICE_PAGE_SIZE: u32 = 10;

const NAME_MESSAGE: &str = "Service name must be between 2 and 100 characters";
const DESCRIPTION_MESSAGE: &str = "Description must be between 10 and 500 characters";
const DURATION_MESSAGE: &str = "Duration must be between 5 and 480 minutes";
const PRICE_MESSAGE: &str = "Price must be a positive number";
const CATEGORY_MESSAGE: &str = "Invalid category";

impl<S: Storage> SalonService<S> {
    pub async fn list_services(&self, filter: &ServiceFilter, page: PageRequest) -> Result<Page<ServiceView>, SalonError> {
        let mut services = self.storage.list_services(filter).await?;
        services.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::from_sorted(services, page).map(ServiceView::from))
    }

    pub async fn get_service(&self, service_id: Uuid) -> Result<ServiceView, SalonError> {
        Ok(ServiceView::from(self.load_service(service_id).await?))
    }

    #[instrument(skip(self, actor, input), fields(actor_id = %actor.id, name = %input.name))]
    pub async fn create_service(&self, actor: &User, input: ServiceInput) -> Result<ServiceView, SalonError> {
        ensure_admin(actor)?;

        let mut v = Validator::new();
        let name = v.text("name", &input.name, 2, 100, NAME_MESSAGE);
        let description = v.text("description", &input.description, 10, 500, DESCRIPTION_MESSAGE);
        // A missing number is NaN and fails its range check.
        let duration = v.minutes(
            "duration",
            input.duration.unwrap_or(f64::NAN),
            MIN_DURATION_MINUTES,
            MAX_DURATION_MINUTES,
            DURATION_MESSAGE,
        );
        let price = v.non_negative("price", input.price.unwrap_or(f64::NAN), PRICE_MESSAGE);
        let category = input
            .category
            .as_deref()
            .and_then(|raw| v.parse::<Category>("category", raw, CATEGORY_MESSAGE))
            .unwrap_or_default();
        v.finish()?;

        let service = self
            .storage
            .save_service(Service::new(name, description, duration, price, category))
            .await?;
        info!(service_id = %service.id, "service created");
        Ok(ServiceView::from(service))
    }

    /// Partial update. An explicit price of 0 is applied like any other value.
    #[instrument(skip(self, actor, changes), fields(actor_id = %actor.id))]
    pub async fn update_service(
        &self,
        actor: &User,
        service_id: Uuid,
        changes: ServiceUpdate,
    ) -> Result<ServiceView, SalonError> {
        ensure_admin(actor)?;

        let mut v = Validator::new();
        let name = changes.name.as_deref().map(|n| v.text("name", n, 2, 100, NAME_MESSAGE));
        let description = changes
            .description
            .as_deref()
            .map(|d| v.text("description", d, 10, 500, DESCRIPTION_MESSAGE));
        let duration = changes
            .duration
            .map(|d| v.minutes("duration", d, MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, DURATION_MESSAGE));
        let price = changes.price.map(|p| v.non_negative("price", p, PRICE_MESSAGE));
        let category = changes
            .category
            .as_deref()
            .and_then(|c| v.parse::<Category>("category", c, CATEGORY_MESSAGE));
        v.finish()?;

        let mut service = self.load_service(service_id).await?;
        if let Some(name) = name {
            service.name = name;
        }
        if let Some(description) = description {
            service.description = description;
        }
        if let Some(duration) = duration {
            service.duration = duration;
        }
        if let Some(price) = price {
            service.price = price;
        }
        if let Some(category) = category {
            service.category = category;
        }
        if let Some(is_active) = changes.is_active {
            service.is_active = is_active;
        }
        service.updated_at = Utc::now();

        let service = self.storage.save_service(service).await?;
        info!(service_id = %service.id, "service updated");
        Ok(ServiceView::from(service))
    }

    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete_service(&self, actor: &User, service_id: Uuid) -> Result<(), SalonError> {
        ensure_admin(actor)?;
        if !self.storage.delete_service(service_id).await? {
            return Err(SalonError::ServiceNotFound(service_id));
        }
        info!(%service_id, "service deleted");
        Ok(())
    }

    /// Category breakdown and averages are computed over active services only.
    pub async fn service_stats(&self, actor: &User) -> Result<ServiceStats, SalonError> {
        ensure_admin(actor)?;
        let services = self.storage.list_services(&ServiceFilter::default()).await?;
        let active: Vec<&Service> = services.iter().filter(|s| s.is_active).collect();

        let mut by_category: HashMap<Category, Vec<&Service>> = HashMap::new();
        for service in active.iter().copied() {
            by_category.entry(service.category).or_default().push(service);
        }
        let mut category_stats: Vec<CategoryStats> = by_category
            .into_iter()
            .map(|(category, members)| CategoryStats {
                category,
                count: members.len(),
                avg_price: average(members.iter().map(|s| s.price)),
                avg_duration: average(members.iter().map(|s| f64::from(s.duration))),
            })
            .collect();
        category_stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.as_str().cmp(b.category.as_str())));

        Ok(ServiceStats {
            total_services: services.len(),
            active_services: active.len(),
            inactive_services: services.len() - active.len(),
            category_stats,
            avg_price: average(active.iter().map(|s| s.price)),
            avg_duration: average(active.iter().map(|s| f64::from(s.duration))),
        })
    }

    pub(crate) async fn load_service(&self, service_id: Uuid) -> Result<Service, SalonError> {
        self.storage
            .get_service(service_id)
            .await?
            .ok_or(SalonError::ServiceNotFound(service_id))
    }
}
