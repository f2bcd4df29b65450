use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::product::{NewProduct, Product, ProductUpdate};
use crate::domain::types::{
    AvailabilityStatus, CategoryId, ImageUrl, ProductId, ProductMessage, ProductName,
};
use crate::models::image::{Image as DbImage, NewImage as DbNewImage};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductChanges as DbProductChanges,
};
use crate::repository::{
    CategoryNameFilter, DieselRepository, ProductListQuery, ProductReader, ProductSort,
    ProductWriter, RepositoryError, RepositoryResult,
};

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::{categories, images, products};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = products::table
                .inner_join(categories::table)
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(products::status.eq(status.as_str()));
            }

            if let Some(search) = &query.search {
                // SQLite LIKE is already case-insensitive for ASCII.
                let pattern = format!("%{}%", search.trim());
                items = items.filter(
                    products::name
                        .like(pattern.clone())
                        .or(products::description.like(pattern.clone()))
                        .nullable()
                        .or(products::message.like(pattern)),
                );
            }

            if let Some(category_id) = query.category_id {
                items = items.filter(products::category_id.eq(category_id.get()));
            }

            match &query.category_name {
                Some(CategoryNameFilter::Exact(name)) => {
                    items = items.filter(categories::name.eq(name.clone()));
                }
                Some(CategoryNameFilter::Contains(name)) => {
                    items = items.filter(categories::name.like(format!("%{name}%")));
                }
                None => {}
            }

            if let Some(min_price) = query.min_price {
                items = items.filter(products::price.ge(min_price));
            }

            if let Some(max_price) = query.max_price {
                items = items.filter(products::price.le(max_price));
            }

            items
        };

        // Totals come from the filtered count, not the unfiltered catalog.
        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        items = match query.sort {
            // Insertion timestamps only have second granularity; id breaks ties.
            ProductSort::NewestFirst => {
                items.order((products::created_at.desc(), products::id.desc()))
            }
            ProductSort::PriceAscending => items.order(products::price.asc()),
            ProductSort::PriceDescending => items.order(products::price.desc()),
        };

        let rows = items
            .select((products::all_columns, categories::name))
            .load::<(DbProduct, String)>(&mut conn)?;

        let ids = rows.iter().map(|(p, _)| p.id).collect::<Vec<i32>>();
        let mut image_map: HashMap<i32, Vec<String>> = HashMap::new();
        for image in images::table
            .filter(images::product_id.eq_any(&ids))
            .order(images::id.asc())
            .load::<DbImage>(&mut conn)?
        {
            image_map.entry(image.product_id).or_default().push(image.url);
        }

        let items = rows
            .into_iter()
            .map(|(product, category_name)| {
                let urls = image_map.remove(&product.id).unwrap_or_default();
                product.into_domain(category_name, urls)
            })
            .collect::<Result<Vec<Product>, _>>()?;

        Ok((total, items))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::{categories, images, products};

        let mut conn = self.conn()?;

        let row = products::table
            .inner_join(categories::table)
            .filter(products::id.eq(id.get()))
            .select((products::all_columns, categories::name))
            .first::<(DbProduct, String)>(&mut conn)
            .optional()?;

        let Some((product, category_name)) = row else {
            return Ok(None);
        };

        let urls = images::table
            .filter(images::product_id.eq(product.id))
            .order(images::id.asc())
            .select(images::url)
            .load::<String>(&mut conn)?;

        Ok(Some(product.into_domain(category_name, urls)?))
    }

    fn product_name_exists(
        &self,
        name: &ProductName,
        exclude: Option<ProductId>,
    ) -> RepositoryResult<bool> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let mut query = products::table
            .filter(products::name.eq(name.as_str()))
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(exclude) = exclude {
            query = query.filter(products::id.ne(exclude.get()));
        }

        let total = query.count().get_result::<i64>(&mut conn)?;
        Ok(total > 0)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(
        &self,
        product: &NewProduct,
        images: &[ImageUrl],
    ) -> RepositoryResult<Product> {
        use crate::schema::{categories, images as images_table, products};

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.clone().into();

        let (created, category_name) =
            conn.transaction::<_, RepositoryError, _>(|conn| {
                let created: DbProduct = diesel::insert_into(products::table)
                    .values(&db_product)
                    .get_result(conn)?;

                let rows = images
                    .iter()
                    .map(|url| DbNewImage {
                        product_id: created.id,
                        url: url.as_str().to_string(),
                        created_at: created.created_at,
                        updated_at: created.updated_at,
                    })
                    .collect::<Vec<_>>();
                diesel::insert_into(images_table::table)
                    .values(&rows)
                    .execute(conn)?;

                let category_name = categories::table
                    .find(created.category_id)
                    .select(categories::name)
                    .first::<String>(conn)?;

                Ok((created, category_name))
            })?;

        let urls = images
            .iter()
            .map(|url| url.as_str().to_string())
            .collect::<Vec<_>>();
        Ok(created.into_domain(category_name, urls)?)
    }

    fn update_product(
        &self,
        id: ProductId,
        changes: &ProductUpdate,
        images: Option<&[ImageUrl]>,
    ) -> RepositoryResult<usize> {
        use crate::schema::{images as images_table, products};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let db_changes = DbProductChanges {
            category_id: changes.category_id.map(CategoryId::get),
            name: changes.name.clone().map(ProductName::into_inner),
            description: changes
                .description
                .clone()
                .map(|description| description.into_inner()),
            message: changes.message.clone().map(ProductMessage::into_inner),
            quantity: changes.quantity.map(|quantity| quantity.get()),
            price: changes.price.map(|price| price.get()),
            status: changes.status.map(String::from),
            updated_at: now,
        };

        conn.transaction::<_, RepositoryError, _>(|conn| {
            if let Some(urls) = images {
                // Replacement set was already uploaded; swap rows atomically.
                diesel::delete(images_table::table.filter(images_table::product_id.eq(id.get())))
                    .execute(conn)?;
                let rows = urls
                    .iter()
                    .map(|url| DbNewImage {
                        product_id: id.get(),
                        url: url.as_str().to_string(),
                        created_at: now,
                        updated_at: now,
                    })
                    .collect::<Vec<_>>();
                diesel::insert_into(images_table::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            let affected = diesel::update(products::table.find(id.get()))
                .set(&db_changes)
                .execute(conn)?;

            Ok(affected)
        })
    }

    fn set_product_status(
        &self,
        id: ProductId,
        from: AvailabilityStatus,
        to: AvailabilityStatus,
    ) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            products::table
                .filter(products::id.eq(id.get()))
                .filter(products::status.eq(from.as_str())),
        )
        .set((
            products::status.eq(to.as_str()),
            products::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
