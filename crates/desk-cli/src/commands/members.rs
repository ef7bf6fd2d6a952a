use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use desk_api::LocalCollaborator;
use desk_data::{MembershipType, YesNo};
use desk_db::Connection;
use desk_views::{MembersView, Phase, SortOrder, TypeFilter};

use crate::commands::report_notice;
use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member
    #[clap(name = "show")]
    Show(ShowMember),
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Add a member
    #[clap(name = "add")]
    Add(AddMember),
    /// Update a member
    #[clap(name = "set")]
    Update(UpdateMember),
    /// Delete a member
    #[clap(name = "delete")]
    Delete(DeleteMember),
}

impl Members {
    pub async fn run(self, db: Connection) -> Result<()> {
        let mut view = MembersView::new(LocalCollaborator::new(db));
        view.load().await;
        if let Phase::Error(message) = view.phase() {
            bail!("{}", message);
        }
        match self {
            Members::Show(cmd) => cmd.run(&view),
            Members::List(cmd) => cmd.run(&mut view),
            Members::Add(cmd) => cmd.run(&mut view).await,
            Members::Update(cmd) => cmd.run(&mut view).await,
            Members::Delete(cmd) => cmd.run(&mut view).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowMember {
    pub fn run(self, view: &MembersView<LocalCollaborator>) -> Result<()> {
        let member = view
            .members()
            .iter()
            .find(|m| m.id == self.id)
            .ok_or_else(|| anyhow!("No member with id {}.", self.id))?;
        println!();
        member.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    /// Substring of the member name
    #[clap(short, long)]
    pub search: Option<String>,
    /// Restrict to a membership type
    #[clap(short = 't', long = "type")]
    pub membership_type: Option<TypeFilter>,
    /// Sort by creation date, "asc" or "desc"
    #[clap(long)]
    pub sort: Option<SortOrder>,
    #[clap(short, long, default_value_t = 1)]
    pub page: usize,
}

impl ListMembers {
    pub fn run(self, view: &mut MembersView<LocalCollaborator>) -> Result<()> {
        if let Some(search) = &self.search {
            view.set_search(search);
        }
        if let Some(filter) = self.membership_type {
            view.set_type_filter(filter);
        }
        if let Some(sort) = self.sort {
            view.set_sort(sort);
        }
        view.set_page(self.page);

        let page = view.visible();
        println!("{} members.", page.total_rows);
        page.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub first_name: String,
    #[clap(short, long)]
    pub last_name: String,
    #[clap(short = 't', long = "type")]
    pub membership_type: Option<MembershipType>,
    #[clap(long)]
    pub expiry: NaiveDate,
    #[clap(long)]
    pub renewal: NaiveDate,
    #[clap(short, long)]
    pub annual: Option<YesNo>,
    #[clap(short = 'm', long)]
    pub length_months: Option<u32>,
    #[clap(long)]
    pub notes1: Option<String>,
    #[clap(long)]
    pub notes2: Option<String>,
    #[clap(long)]
    pub notes3: Option<String>,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub yes: bool,
}

impl AddMember {
    pub async fn run(self, view: &mut MembersView<LocalCollaborator>) -> Result<()> {
        view.open_add();
        {
            let form = view
                .form_mut()
                .ok_or_else(|| anyhow!("No open member form."))?;
            form.first_name = self.first_name;
            form.last_name = self.last_name;
            form.membership_expiry = Some(self.expiry);
            form.membership_renewal = Some(self.renewal);
            if let Some(membership_type) = self.membership_type {
                form.membership_type = membership_type;
            }
            if let Some(annual) = self.annual {
                form.annual_membership = annual;
            }
            if let Some(length_months) = self.length_months {
                form.length_months = length_months;
            }
            if let Some(notes1) = self.notes1 {
                form.notes1 = notes1;
            }
            if let Some(notes2) = self.notes2 {
                form.notes2 = notes2;
            }
            if let Some(notes3) = self.notes3 {
                form.notes3 = notes3;
            }
            println!();
            println!("Name:\t\t\t{} {}", form.first_name, form.last_name);
            println!("Membership Type:\t{}", form.membership_type);
            println!("Annual Membership:\t{}", form.annual_membership);
            println!("Length (months):\t{}", form.length_months);
            println!();
        }

        if !self.yes {
            let confirm = Confirm::new("Add member?").with_default(true);
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
pub struct UpdateMember {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub first_name: Option<String>,
    #[clap(short, long)]
    pub last_name: Option<String>,
    #[clap(short = 't', long = "type")]
    pub membership_type: Option<MembershipType>,
    #[clap(long)]
    pub expiry: Option<NaiveDate>,
    #[clap(long)]
    pub renewal: Option<NaiveDate>,
    #[clap(short, long)]
    pub annual: Option<YesNo>,
    #[clap(short = 'm', long)]
    pub length_months: Option<u32>,
    #[clap(long)]
    pub notes1: Option<String>,
    #[clap(long)]
    pub notes2: Option<String>,
    #[clap(long)]
    pub notes3: Option<String>,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub yes: bool,
}

impl UpdateMember {
    pub async fn run(self, view: &mut MembersView<LocalCollaborator>) -> Result<()> {
        if !view.open_edit(self.id) {
            bail!("No member with id {}.", self.id);
        }
        {
            let form = view
                .form_mut()
                .ok_or_else(|| anyhow!("No open member form."))?;
            if let Some(first_name) = self.first_name {
                form.first_name = first_name;
            }
            if let Some(last_name) = self.last_name {
                form.last_name = last_name;
            }
            if let Some(membership_type) = self.membership_type {
                form.membership_type = membership_type;
            }
            if let Some(expiry) = self.expiry {
                form.membership_expiry = Some(expiry);
            }
            if let Some(renewal) = self.renewal {
                form.membership_renewal = Some(renewal);
            }
            if let Some(annual) = self.annual {
                form.annual_membership = annual;
            }
            if let Some(length_months) = self.length_months {
                form.length_months = length_months;
            }
            if let Some(notes1) = self.notes1 {
                form.notes1 = notes1;
            }
            if let Some(notes2) = self.notes2 {
                form.notes2 = notes2;
            }
            if let Some(notes3) = self.notes3 {
                form.notes3 = notes3;
            }
            println!();
            println!("Name:\t\t\t{} {}", form.first_name, form.last_name);
            println!("Membership Type:\t{}", form.membership_type);
            println!("Annual Membership:\t{}", form.annual_membership);
            println!("Length (months):\t{}", form.length_months);
            println!();
        }

        if !self.yes {
            let confirm = Confirm::new("Update member?").with_default(true);
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
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: u32,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteMember {
    pub async fn run(self, view: &mut MembersView<LocalCollaborator>) -> Result<()> {
        let member = view
            .begin_delete(self.id)
            .ok_or_else(|| anyhow!("No member with id {}.", self.id))?;
        println!();
        member.print_formatted();
        println!();

        if !self.yes {
            let confirm =
                Confirm::new("Delete member from database?").with_default(true);
            if !confirm.prompt()? {
                view.cancel_delete();
                return Ok(());
            }
        }

        view.confirm_delete().await;
        report_notice(view.take_notice())
    }
}
