use std::time::Duration;

use crate::models::{Category, Customer, Order, Product, User};
use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, PgPool, Result};

/// Connects to a PostgreSQL database with the given `db_url`, returning a connection pool for accessing it
pub async fn connect_sqlx(db_url: &str) -> sqlx::PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .idle_timeout(Duration::from_secs(30))
        .max_connections(32)
        .min_connections(4)
        .connect(db_url)
        .await
        .expect("Could not connect to the database")
}

const PRODUCT_COLUMNS: &str = r#"
    p.id, p.name, p.description, p.price, p.category_id, c.name AS category_name,
    p.is_available, p.preparation_time, p.created_at, p.updated_at
"#;

const PRODUCT_FILTER: &str = r#"
    ($1::INTEGER IS NULL OR p.category_id = $1)
    AND ($2::NUMERIC IS NULL OR p.price = $2)
    AND ($3::TEXT IS NULL OR p.name ILIKE '%' || $3 || '%' OR p.description ILIKE '%' || $3 || '%')
"#;

pub struct PostgreDatabase {
    sqlx_db: PgPool,
}

impl PostgreDatabase {
    pub fn new(sqlx_db: PgPool) -> Self {
        PostgreDatabase { sqlx_db }
    }

    /// Applies the embedded SQL migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.sqlx_db).await
    }

    /// Create a new user using a reference to a `User` struct
    pub async fn create_user(&self, user: &User) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO app_user (name, email, hashed_password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, hashed_password, role, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(user.role)
        .fetch_one(&self.sqlx_db)
        .await
    }

    /// Get a user by email
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, hashed_password, role, created_at, updated_at
            FROM app_user
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.sqlx_db)
        .await?;
        Ok(row)
    }

    // Create a new category using a reference to a `Category` struct
    pub async fn create_category(&self, new_category: &Category) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO category (name, description, is_active)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, is_active
            "#,
        )
        .bind(&new_category.name)
        .bind(&new_category.description)
        .bind(new_category.is_active)
        .fetch_one(&self.sqlx_db)
        .await
    }

    /// Get a category by ID
    pub async fn get_category_by_id(&self, id: i32) -> Result<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, is_active
            FROM category
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.sqlx_db)
        .await?;
        Ok(row)
    }

    /// Fetch one page of categories
    pub async fn list_categories(&self, limit: i64, offset: i64) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, is_active
            FROM category
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.sqlx_db)
        .await
    }

    pub async fn count_categories(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM category")
            .fetch_one(&self.sqlx_db)
            .await
    }

    /// Update an existing category
    pub async fn update_category(&self, category: &Category) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE category
            SET name = $1,
                description = $2,
                is_active = $3
            WHERE id = $4
            RETURNING id, name, description, is_active
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.is_active)
        .bind(category.id)
        .fetch_one(&self.sqlx_db)
        .await
    }

    /// Delete a category, returning whether a row was removed. Products keep
    /// existing with a null category (`ON DELETE SET NULL`).
    pub async fn delete_category(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(&self.sqlx_db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Create a new product; the returned row carries the resolved category name
    pub async fn create_product(&self, product: &Product) -> Result<Product> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO product (name, description, price, category_id, is_available, preparation_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.category_id)
        .bind(product.is_available)
        .bind(product.preparation_time)
        .fetch_one(&self.sqlx_db)
        .await?;

        let created = self.get_product_by_id(id).await?;
        created.ok_or(sqlx::Error::RowNotFound)
    }

    /// Get a product by ID, with its category name joined in
    pub async fn get_product_by_id(&self, id: i32) -> Result<Option<Product>> {
        let query = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM product p
            LEFT JOIN category c ON c.id = p.category_id
            WHERE p.id = $1
            "#
        );
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.sqlx_db)
            .await?;
        Ok(row)
    }

    /// Fetch one page of products, newest first, narrowed by the optional
    /// category/price/search filters
    pub async fn list_products(
        &self,
        category: Option<i32>,
        price: Option<Decimal>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>> {
        let query = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM product p
            LEFT JOIN category c ON c.id = p.category_id
            WHERE {PRODUCT_FILTER}
            ORDER BY p.created_at DESC
            LIMIT $4 OFFSET $5
            "#
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(category)
            .bind(price)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.sqlx_db)
            .await
    }

    pub async fn count_products(
        &self,
        category: Option<i32>,
        price: Option<Decimal>,
        search: Option<&str>,
    ) -> Result<i64> {
        let query = format!("SELECT COUNT(*) FROM product p WHERE {PRODUCT_FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(category)
            .bind(price)
            .bind(search)
            .fetch_one(&self.sqlx_db)
            .await
    }

    /// Update an existing product
    pub async fn update_product(&self, product: &Product) -> Result<Product> {
        sqlx::query(
            r#"
            UPDATE product
            SET name = $1,
                description = $2,
                price = $3,
                category_id = $4,
                is_available = $5,
                preparation_time = $6,
                updated_at = now()
            WHERE id = $7
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.category_id)
        .bind(product.is_available)
        .bind(product.preparation_time)
        .bind(product.id)
        .execute(&self.sqlx_db)
        .await?;

        let updated = self.get_product_by_id(product.id).await?;
        updated.ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn delete_product(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(&self.sqlx_db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Create a new customer using a reference to a `Customer` struct
    pub async fn create_customer(&self, new_customer: &Customer) -> Result<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customer (name, email, phone_number, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone_number, address, created_at, updated_at
            "#,
        )
        .bind(&new_customer.name)
        .bind(&new_customer.email)
        .bind(&new_customer.phone_number)
        .bind(&new_customer.address)
        .fetch_one(&self.sqlx_db)
        .await
    }

    /// Get a customer by ID
    pub async fn get_customer_by_id(&self, id: i32) -> Result<Option<Customer>> {
        let row = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone_number, address, created_at, updated_at
            FROM customer
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.sqlx_db)
        .await?;
        Ok(row)
    }

    pub async fn list_customers(&self, limit: i64, offset: i64) -> Result<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone_number, address, created_at, updated_at
            FROM customer
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.sqlx_db)
        .await
    }

    pub async fn count_customers(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customer")
            .fetch_one(&self.sqlx_db)
            .await
    }

    /// Update an existing customer
    pub async fn update_customer(&self, customer: &Customer) -> Result<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customer
            SET name = $1,
                email = $2,
                phone_number = $3,
                address = $4,
                updated_at = now()
            WHERE id = $5
            RETURNING id, name, email, phone_number, address, created_at, updated_at
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .bind(customer.id)
        .fetch_one(&self.sqlx_db)
        .await
    }

    pub async fn delete_customer(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customer WHERE id = $1")
            .bind(id)
            .execute(&self.sqlx_db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Create a new order using a reference to an `Order` struct
    pub async fn create_order(&self, new_order: &Order) -> Result<Order> {
        sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_id, status, total_amount, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_id, status, total_amount, notes, created_at, updated_at
            "#,
        )
        .bind(new_order.customer_id)
        .bind(new_order.status)
        .bind(new_order.total_amount)
        .bind(&new_order.notes)
        .fetch_one(&self.sqlx_db)
        .await
    }

    /// Get an order by ID
    pub async fn get_order_by_id(&self, id: i32) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, status, total_amount, notes, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.sqlx_db)
        .await?;
        Ok(row)
    }

    /// Fetch one page of orders, newest first
    pub async fn list_orders(&self, limit: i64, offset: i64) -> Result<Vec<Order>> {
        sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, status, total_amount, notes, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.sqlx_db)
        .await
    }

    pub async fn count_orders(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.sqlx_db)
            .await
    }

    /// Update an existing order
    pub async fn update_order(&self, order: &Order) -> Result<Order> {
        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET customer_id = $1,
                status = $2,
                total_amount = $3,
                notes = $4,
                updated_at = now()
            WHERE id = $5
            RETURNING id, customer_id, status, total_amount, notes, created_at, updated_at
            "#,
        )
        .bind(order.customer_id)
        .bind(order.status)
        .bind(order.total_amount)
        .bind(&order.notes)
        .bind(order.id)
        .fetch_one(&self.sqlx_db)
        .await
    }

    pub async fn delete_order(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.sqlx_db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
