use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use desk_data::{Delete, Insert, Payment, PaymentFilter, Query, Retrieve, Update};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Payment> for Connection {
    type Filter = PaymentFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Payment>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                member_id,
                ROUND(amount, 10) AS amount,
                date,
                payment_type,
                expiry
            FROM payments
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(member_id) = filter.member_id {
            qry.push(" AND member_id = ").push_bind(member_id);
        }
        if let Some(date_before) = filter.date_before {
            qry.push(" AND date <= ").push_bind(date_before);
        }
        if let Some(date_after) = filter.date_after {
            qry.push(" AND date >= ").push_bind(date_after);
        }

        let payments: Vec<Payment> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(payments)
    }
}

#[async_trait]
impl Retrieve<Payment> for Connection {
    async fn retrieve(&self, payment_id: u32) -> Result<Payment> {
        let filter = PaymentFilter {
            id: Some(payment_id),
            ..Default::default()
        };
        let payment = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(payment)
    }
}

#[async_trait]
impl Insert<Payment> for Connection {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO payments (
                    member_id,
                    amount,
                    date,
                    payment_type,
                    expiry
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(payment.member_id)
                .push_bind(payment.amount)
                .push_bind(payment.date)
                .push_bind(payment.payment_type)
                .push_bind(payment.expiry);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Payment> for Connection {
    /// Update payment
    async fn update(&self, payment: Payment) -> Result<Payment> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE payments SET")
                .push(" member_id = ")
                .push_bind(payment.member_id)
                .push(", amount = ")
                .push_bind(payment.amount)
                .push(", date = ")
                .push_bind(payment.date)
                .push(", payment_type = ")
                .push_bind(payment.payment_type)
                .push(", expiry = ")
                .push_bind(payment.expiry)
                .push(" WHERE id = ")
                .push_bind(payment.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(payment.id).await
    }
}

#[async_trait]
impl Delete<Payment> for Connection {
    /// Delete payment
    async fn delete(&self, payment: &Payment) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM payments WHERE id = ")
            .push_bind(payment.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
