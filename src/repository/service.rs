use chrono::Utc;
use diesel::prelude::*;

use crate::domain::service::{NewService, Service, ServiceUpdate};
use crate::domain::types::{AvailabilityStatus, ProductPrice, ServiceDuration, ServiceId};
use crate::models::service::{
    NewService as DbNewService, Service as DbService, ServiceChanges as DbServiceChanges,
};
use crate::repository::{
    DieselRepository, RepositoryResult, ServiceListQuery, ServiceReader, ServiceWriter,
};

impl ServiceReader for DieselRepository {
    fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<(usize, Vec<Service>)> {
        use crate::schema::services;

        let mut conn = self.conn()?;

        let query_builder = || services::table.into_boxed::<diesel::sqlite::Sqlite>();

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .order(services::name.asc())
            .load::<DbService>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Service>, _>>()?;

        Ok((total, items))
    }

    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        use crate::schema::services;

        let mut conn = self.conn()?;

        let service = services::table
            .filter(services::id.eq(id.get()))
            .first::<DbService>(&mut conn)
            .optional()?;

        let service = service.map(TryInto::try_into).transpose()?;
        Ok(service)
    }
}

impl ServiceWriter for DieselRepository {
    fn create_service(&self, service: &NewService) -> RepositoryResult<Service> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        let db_service: DbNewService = service.clone().into();

        let created: DbService = diesel::insert_into(services::table)
            .values(db_service)
            .get_result(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_service(&self, id: ServiceId, changes: &ServiceUpdate) -> RepositoryResult<usize> {
        use crate::schema::services;

        let mut conn = self.conn()?;

        let db_changes = DbServiceChanges {
            name: changes.name.clone().map(String::from),
            description: changes.description.clone(),
            price: changes.price.map(ProductPrice::get),
            duration_minutes: changes.duration_minutes.map(ServiceDuration::get),
            updated_at: Utc::now().naive_utc(),
        };

        let affected = diesel::update(services::table.find(id.get()))
            .set(&db_changes)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn set_service_status(
        &self,
        id: ServiceId,
        from: AvailabilityStatus,
        to: AvailabilityStatus,
    ) -> RepositoryResult<usize> {
        use crate::schema::services;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            services::table
                .filter(services::id.eq(id.get()))
                .filter(services::status.eq(from.as_str())),
        )
        .set((
            services::status.eq(to.as_str()),
            services::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
