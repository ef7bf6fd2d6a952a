use desk_data::{Member, Payment};
use desk_views::{NameIndex, Page};

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        println!("Name:\t\t\t{}", self.full_name());
        println!("Membership Type:\t{}", self.membership_type);
        println!("Expiry Date:\t\t{}", self.membership_expiry);
        println!("Renewal Date:\t\t{}", self.membership_renewal);
        println!("Annual Membership:\t{}", self.annual_membership);
        println!("Length (months):\t{}", self.length_months);
        if !self.notes1.is_empty() {
            println!("Notes 1:\t\t{}", self.notes1);
        }
        if !self.notes2.is_empty() {
            println!("Notes 2:\t\t{}", self.notes2);
        }
        if !self.notes3.is_empty() {
            println!("Notes 3:\t\t{}", self.notes3);
        }
    }
}

impl PrintFormatted for Page<Member> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<30}\t{:<10}\t{:<12}\t{:<12}\t{:<6}\t{:>6}",
            "ID", "Name", "Type", "Expiry", "Renewal", "Annual", "Months"
        );
        println!("{:-<110}", "-");
        for member in &self.rows {
            println!(
                "{:>4}\t{:<30}\t{:<10}\t{}\t{}\t{:<6}\t{:>6}",
                member.id,
                member.full_name(),
                member.membership_type.to_string(),
                member.membership_expiry,
                member.membership_renewal,
                member.annual_membership.to_string(),
                member.length_months,
            );
        }
        println!("Page {} of {}", self.page, self.total_pages);
    }
}

impl PrintFormatted for (&Payment, &NameIndex) {
    fn print_formatted(&self) {
        let (payment, names) = self;
        println!("Date:\t\t\t{}", payment.date);
        println!("Member:\t\t\t{}", names.resolve(payment.member_id));
        println!("Amount:\t\t\t{:.2}", payment.amount);
        println!("Payment Type:\t\t{}", payment.payment_type);
        println!("Expiry Date:\t\t{}", payment.expiry);
    }
}

impl PrintFormatted for (&Page<Payment>, &NameIndex) {
    fn print_formatted(&self) {
        let (page, names) = self;
        println!(
            "{:>4}\t{:<12}\t{:<30}\t{:>10}\t{:<10}\t{:<12}",
            "ID", "Date", "Member", "Amount", "Type", "Expiry"
        );
        println!("{:-<100}", "-");
        for payment in &page.rows {
            println!(
                "{:>4}\t{}\t{:<30}\t{:>10.2}\t{:<10}\t{}",
                payment.id,
                payment.date,
                names.resolve(payment.member_id),
                payment.amount,
                payment.payment_type.to_string(),
                payment.expiry,
            );
        }
        println!("Page {} of {}", page.page, page.total_pages);
    }
}
