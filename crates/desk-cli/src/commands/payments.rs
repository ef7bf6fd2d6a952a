use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use desk_api::LocalCollaborator;
use desk_data::MembershipType;
use desk_db::Connection;
use desk_views::{MonthFilter, PaymentsView, Phase, SortOrder, TypeFilter};

use crate::commands::report_notice;
use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Payments {
    /// Show a payment
    #[clap(name = "show")]
    Show(ShowPayment),
    /// List payments
    #[clap(name = "list")]
    List(ListPayments),
    /// Add a payment
    #[clap(name = "add")]
    Add(AddPayment),
    /// Update a payment
    #[clap(name = "set")]
    Update(UpdatePayment),
    /// Delete a payment
    #[clap(name = "delete")]
    Delete(DeletePayment),
}

impl Payments {
    pub async fn run(self, db: Connection) -> Result<()> {
        let mut view = PaymentsView::new(LocalCollaborator::new(db));
        view.load().await;
        if let Phase::Error(message) = view.phase() {
            bail!("{}", message);
        }
        match self {
            Payments::Show(cmd) => cmd.run(&view),
            Payments::List(cmd) => cmd.run(&mut view),
            Payments::Add(cmd) => cmd.run(&mut view).await,
            Payments::Update(cmd) => cmd.run(&mut view).await,
            Payments::Delete(cmd) => cmd.run(&mut view).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowPayment {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowPayment {
    pub fn run(self, view: &PaymentsView<LocalCollaborator>) -> Result<()> {
        let payment = view
            .payments()
            .iter()
            .find(|p| p.id == self.id)
            .ok_or_else(|| anyhow!("No payment with id {}.", self.id))?;
        println!();
        (payment, view.names()).print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListPayments {
    /// Substring of the paying member's name
    #[clap(short, long)]
    pub search: Option<String>,
    /// Restrict to a payment type
    #[clap(short = 't', long = "type")]
    pub payment_type: Option<TypeFilter>,
    /// Restrict to a payment month, e.g. "Jan"
    #[clap(short, long)]
    pub month: Option<MonthFilter>,
    /// Sort by payment date, "asc" or "desc"
    #[clap(long)]
    pub sort: Option<SortOrder>,
    #[clap(short, long, default_value_t = 1)]
    pub page: usize,
}

impl ListPayments {
    pub fn run(self, view: &mut PaymentsView<LocalCollaborator>) -> Result<()> {
        if let Some(search) = &self.search {
            view.set_search(search);
        }
        if let Some(filter) = self.payment_type {
            view.set_type_filter(filter);
        }
        if let Some(month) = self.month {
            view.set_month_filter(month);
        }
        if let Some(sort) = self.sort {
            view.set_sort(sort);
        }
        view.set_page(self.page);

        let page = view.visible();
        println!("Total payments: {}", page.total_rows);
        (&page, view.names()).print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddPayment {
    #[clap(short, long)]
    pub member_id: u32,
    #[clap(short, long)]
    pub amount: f64,
    /// Payment date, defaults to today
    #[clap(short, long)]
    pub date: Option<NaiveDate>,
    #[clap(short = 't', long = "type")]
    pub payment_type: Option<MembershipType>,
    #[clap(long)]
    pub expiry: NaiveDate,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub yes: bool,
}

impl AddPayment {
    pub async fn run(self, view: &mut PaymentsView<LocalCollaborator>) -> Result<()> {
        let member = view.resolve_name(self.member_id).to_string();

        view.open_add();
        {
            let form = view
                .form_mut()
                .ok_or_else(|| anyhow!("No open payment form."))?;
            form.member_id = Some(self.member_id);
            form.amount = Some(self.amount);
            form.expiry = Some(self.expiry);
            if let Some(date) = self.date {
                form.date = date;
            }
            if let Some(payment_type) = self.payment_type {
                form.payment_type = payment_type;
            }
            println!();
            println!("Member:\t\t\t{}", member);
            println!("Amount:\t\t\t{:.2}", self.amount);
            println!("Date:\t\t\t{}", form.date);
            println!("Payment Type:\t\t{}", form.payment_type);
            println!("Expiry Date:\t\t{}", self.expiry);
            println!();
        }

        if !self.yes {
            let confirm = Confirm::new("Add payment?").with_default(true);
            if !confirm.prompt()? {
                view.close_modal();
                return Ok(());
            }
        }

        view.submit().await;
        report_notice(view.take_notice())
    }
}

#[derive(Args, Debug)]
pub struct UpdatePayment {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub member_id: Option<u32>,
    #[clap(short, long)]
    pub amount: Option<f64>,
    #[clap(short, long)]
    pub date: Option<NaiveDate>,
    #[clap(short = 't', long = "type")]
    pub payment_type: Option<MembershipType>,
    #[clap(long)]
    pub expiry: Option<NaiveDate>,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub yes: bool,
}

impl UpdatePayment {
    pub async fn run(self, view: &mut PaymentsView<LocalCollaborator>) -> Result<()> {
        if !view.open_edit(self.id) {
            bail!("No payment with id {}.", self.id);
        }
        {
            let form = view
                .form_mut()
                .ok_or_else(|| anyhow!("No open payment form."))?;
            if let Some(member_id) = self.member_id {
                form.member_id = Some(member_id);
            }
            if let Some(amount) = self.amount {
                form.amount = Some(amount);
            }
            if let Some(date) = self.date {
                form.date = date;
            }
            if let Some(payment_type) = self.payment_type {
                form.payment_type = payment_type;
            }
            if let Some(expiry) = self.expiry {
                form.expiry = Some(expiry);
            }
        }

        if !self.yes {
            let confirm = Confirm::new("Update payment?").with_default(true);
            if !confirm.prompt()? {
                view.close_modal();
                return Ok(());
            }
        }

        view.submit().await;
        report_notice(view.take_notice())
    }
}

#[derive(Args, Debug)]
pub struct DeletePayment {
    #[clap(short, long)]
    pub id: u32,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub yes: bool,
}

impl DeletePayment {
    pub async fn run(self, view: &mut PaymentsView<LocalCollaborator>) -> Result<()> {
        if view.begin_delete(self.id).is_none() {
            bail!("No payment with id {}.", self.id);
        }
        println!();
        if let Some(payment) = view.payments().iter().find(|p| p.id == self.id) {
            (payment, view.names()).print_formatted();
        }
        println!();

        if !self.yes {
            let confirm =
                Confirm::new("Delete payment from database?").with_default(true);
            if !confirm.prompt()? {
                view.cancel_delete();
                return Ok(());
            }
        }

        view.confirm_delete().await;
        report_notice(view.take_notice())
    }
}
