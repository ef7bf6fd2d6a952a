use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use desk_data::{Delete, Insert, Member, MemberFilter, Query, Retrieve, Update};

use crate::{
    results::{Id, QueryError},
    Connection,
};

#[async_trait]
impl Query<Member> for Connection {
    type Filter = MemberFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Member>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                first_name,
                last_name,
                membership_type,
                membership_expiry,
                membership_renewal,
                annual_membership,
                notes1,
                notes2,
                notes3,
                length_months,
                created_at
            FROM members
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND first_name || ' ' || last_name LIKE ")
                .push_bind(format!("%{}%", name));
        }
        if let Some(membership_type) = filter.membership_type {
            qry.push(" AND membership_type = ").push_bind(membership_type);
        }

        let members: Vec<Member> = qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(members)
    }
}

#[async_trait]
impl Retrieve<Member> for Connection {
    async fn retrieve(&self, member_id: u32) -> Result<Member> {
        let filter = MemberFilter {
            id: Some(member_id),
            ..Default::default()
        };
        let member = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(QueryError::NotFound)?;
        Ok(member)
    }
}

#[async_trait]
impl Insert<Member> for Connection {
    async fn insert(&self, member: Member) -> Result<Member> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO members (
                    first_name,
                    last_name,
                    membership_type,
                    membership_expiry,
                    membership_renewal,
                    annual_membership,
                    notes1,
                    notes2,
                    notes3,
                    length_months
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&member.first_name)
                .push_bind(&member.last_name)
                .push_bind(member.membership_type)
                .push_bind(member.membership_expiry)
                .push_bind(member.membership_renewal)
                .push_bind(member.annual_membership)
                .push_bind(&member.notes1)
                .push_bind(&member.notes2)
                .push_bind(&member.notes3)
                .push_bind(member.length_months);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Member> for Connection {
    /// Update member
    async fn update(&self, member: Member) -> Result<Member> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE members SET")
                .push(" first_name = ")
                .push_bind(&member.first_name)
                .push(", last_name = ")
                .push_bind(&member.last_name)
                .push(", membership_type = ")
                .push_bind(member.membership_type)
                .push(", membership_expiry = ")
                .push_bind(member.membership_expiry)
                .push(", membership_renewal = ")
                .push_bind(member.membership_renewal)
                .push(", annual_membership = ")
                .push_bind(member.annual_membership)
                .push(", notes1 = ")
                .push_bind(&member.notes1)
                .push(", notes2 = ")
                .push_bind(&member.notes2)
                .push(", notes3 = ")
                .push_bind(&member.notes3)
                .push(", length_months = ")
                .push_bind(member.length_months)
                .push(" WHERE id = ")
                .push_bind(member.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(member.id).await
    }
}

#[async_trait]
impl Delete<Member> for Connection {
    /// Delete member
    async fn delete(&self, member: &Member) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM members WHERE id = ")
            .push_bind(member.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
